use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PrecisionConfig;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::payments::{AmortizationSchedule, PaymentCalculator};
use crate::types::LoanTerms;

/// owner reference carried on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOwner {
    pub id: i64,
    pub login: String,
}

/// loan account record as exchanged with the record layer
///
/// Fields are optional because records arrive partially filled (new accounts
/// have no id, payment and balance until computed).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAccount {
    pub id: Option<i64>,
    pub account_name: Option<String>,
    pub loan_amount: Option<Money>,
    /// annual rate as a percentage
    pub interest_rate: Option<Decimal>,
    pub term_months: Option<u32>,
    pub monthly_payment: Option<Money>,
    pub remaining_balance: Option<Money>,
    pub user: Option<AccountOwner>,
}

impl LoanAccount {
    pub fn builder() -> LoanAccountBuilder {
        LoanAccountBuilder::new()
    }

    /// terms snapshot for the payment calculator
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.loan_amount,
            annual_rate_percent: self.interest_rate,
            term_months: self.term_months,
        }
    }

    /// check the field constraints the record layer enforces before saving
    pub fn validate(&self) -> Result<()> {
        match &self.account_name {
            None => return Err(AmortizationError::MissingField { field: "accountName" }),
            Some(name) if name.trim().is_empty() => {
                return Err(AmortizationError::Validation {
                    field: "accountName",
                    message: "must not be blank".to_string(),
                });
            }
            Some(_) => {}
        }

        let loan_amount = self
            .loan_amount
            .ok_or(AmortizationError::MissingField { field: "loanAmount" })?;
        if loan_amount.is_negative() {
            return Err(AmortizationError::Validation {
                field: "loanAmount",
                message: format!("must be at least 0, got {}", loan_amount),
            });
        }

        let interest_rate = self
            .interest_rate
            .ok_or(AmortizationError::MissingField { field: "interestRate" })?;
        if interest_rate < Decimal::ZERO {
            return Err(AmortizationError::Validation {
                field: "interestRate",
                message: format!("must be at least 0, got {}", interest_rate),
            });
        }

        let term_months = self
            .term_months
            .ok_or(AmortizationError::MissingField { field: "termMonths" })?;
        if term_months < 1 {
            return Err(AmortizationError::Validation {
                field: "termMonths",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// copy of this record with the monthly payment filled in
    ///
    /// The remaining balance starts at the loan amount unless the record
    /// already tracks one.
    pub fn with_computed_payment(&self, calculator: &PaymentCalculator) -> Result<Self> {
        let payment = calculator.calculate(&self.terms())?.monthly_payment;

        let mut updated = self.clone();
        updated.monthly_payment = Some(payment);
        if updated.remaining_balance.is_none() {
            updated.remaining_balance = updated.loan_amount;
        }

        debug!(
            id = ?self.id,
            monthly_payment = %payment,
            "computed payment for loan account"
        );

        Ok(updated)
    }

    /// amortization schedule for the stored monthly payment
    pub fn amortization_schedule(&self, config: PrecisionConfig) -> Result<AmortizationSchedule> {
        let principal = self
            .loan_amount
            .ok_or(AmortizationError::MissingField { field: "loanAmount" })?;
        let rate = self
            .interest_rate
            .ok_or(AmortizationError::MissingField { field: "interestRate" })?;
        let term = self
            .term_months
            .ok_or(AmortizationError::MissingField { field: "termMonths" })?;
        let payment = self.monthly_payment.ok_or(AmortizationError::PaymentNotComputed)?;

        AmortizationSchedule::generate(principal, rate, term, payment, config)
    }

    /// merge the fields present in `patch` over this record
    pub fn apply_patch(&self, patch: &LoanAccountPatch) -> Self {
        let mut merged = self.clone();
        if let Some(name) = &patch.account_name {
            merged.account_name = Some(name.clone());
        }
        if patch.loan_amount.is_some() {
            merged.loan_amount = patch.loan_amount;
        }
        if patch.interest_rate.is_some() {
            merged.interest_rate = patch.interest_rate;
        }
        if patch.term_months.is_some() {
            merged.term_months = patch.term_months;
        }
        if patch.monthly_payment.is_some() {
            merged.monthly_payment = patch.monthly_payment;
        }
        if patch.remaining_balance.is_some() {
            merged.remaining_balance = patch.remaining_balance;
        }
        merged
    }

    /// pretty json of the record
    pub fn json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// partial update; absent fields leave the record untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAccountPatch {
    pub account_name: Option<String>,
    pub loan_amount: Option<Money>,
    pub interest_rate: Option<Decimal>,
    pub term_months: Option<u32>,
    pub monthly_payment: Option<Money>,
    pub remaining_balance: Option<Money>,
}

/// builder for loan accounts
#[derive(Debug, Default)]
pub struct LoanAccountBuilder {
    id: Option<i64>,
    account_name: Option<String>,
    loan_amount: Option<Money>,
    interest_rate: Option<Decimal>,
    term_months: Option<u32>,
    remaining_balance: Option<Money>,
    user: Option<AccountOwner>,
}

impl LoanAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = Some(name.into());
        self
    }

    pub fn loan_amount(mut self, amount: Money) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    /// annual rate as a percentage
    pub fn interest_rate(mut self, rate: Decimal) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn remaining_balance(mut self, balance: Money) -> Self {
        self.remaining_balance = Some(balance);
        self
    }

    pub fn user(mut self, id: i64, login: impl Into<String>) -> Self {
        self.user = Some(AccountOwner {
            id,
            login: login.into(),
        });
        self
    }

    /// validate and compute the payment with the default precision
    pub fn build(self) -> Result<LoanAccount> {
        self.build_with(&PaymentCalculator::default())
    }

    pub fn build_with(self, calculator: &PaymentCalculator) -> Result<LoanAccount> {
        let account = LoanAccount {
            id: self.id,
            account_name: self.account_name,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            term_months: self.term_months,
            monthly_payment: None,
            remaining_balance: self.remaining_balance,
            user: self.user,
        };
        account.validate()?;
        account.with_computed_payment(calculator)
    }
}
