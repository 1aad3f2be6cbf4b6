use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// loan terms snapshot handed to the payment calculator
///
/// Every field is optional: a record that has not been fully filled in yet
/// still yields a (zero) payment instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Option<Money>,
    /// nominal annual rate as a percentage, 6.0 means 6%
    pub annual_rate_percent: Option<Decimal>,
    pub term_months: Option<u32>,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Decimal, term_months: u32) -> Self {
        Self {
            principal: Some(principal),
            annual_rate_percent: Some(annual_rate_percent),
            term_months: Some(term_months),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.principal.is_some() && self.annual_rate_percent.is_some() && self.term_months.is_some()
    }
}

/// monthly payment computed from a set of loan terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub monthly_payment: Money,
}

/// component of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Principal,
    Interest,
    Fee,
    Overpayment,
}

/// one month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: Money,
    #[serde(rename = "principal")]
    pub principal_portion: Money,
    #[serde(rename = "interest")]
    pub interest_portion: Money,
    #[serde(rename = "remainingBalance")]
    pub remaining_balance: Money,
}

impl ScheduleEntry {
    /// split the payment into its typed components
    pub fn components(&self) -> [(PaymentType, Money); 2] {
        [
            (PaymentType::Principal, self.principal_portion),
            (PaymentType::Interest, self.interest_portion),
        ]
    }
}
