//! json views of schedules for the record layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::AmortizationSchedule;
use crate::types::ScheduleEntry;

/// schedule body: a list of `{month, payment, principal, interest, remainingBalance}` maps
pub fn schedule_to_value(entries: &[ScheduleEntry]) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(entries)?)
}

pub fn schedule_to_json(entries: &[ScheduleEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// schedule with its summary figures
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub principal: Money,
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        ScheduleView {
            principal: schedule.principal,
            interest_rate: schedule.annual_rate_percent,
            term_months: schedule.term_months,
            monthly_payment: schedule.monthly_payment,
            total_payment: schedule.total_payment,
            total_interest: schedule.total_interest,
            entries: schedule.entries.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
