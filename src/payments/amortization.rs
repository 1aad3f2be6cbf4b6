use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PrecisionConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::payments::calculator::PaymentCalculator;
use crate::types::{LoanTerms, ScheduleEntry};

/// month-by-month schedule generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator {
    config: PrecisionConfig,
}

impl ScheduleGenerator {
    pub fn new(config: PrecisionConfig) -> Self {
        Self { config }
    }

    /// generate exactly `term_months` entries for a fixed monthly payment
    ///
    /// Each month charges interest on the running balance (half-up to cents)
    /// and applies the rest of the payment to principal. The last month pays
    /// off whatever balance is left, so the final remaining balance is
    /// exactly zero even when earlier rounding drifted. The payment is
    /// trusted as given.
    pub fn generate_schedule(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        monthly_payment: Money,
    ) -> Result<Vec<ScheduleEntry>> {
        let monthly_rate = Rate::from_percent(annual_rate_percent, self.config.rate_scale)?
            .monthly(self.config.rate_scale)?;

        let mut entries = Vec::with_capacity(term_months as usize);
        let mut balance = principal;
        let mut current_payment = monthly_payment;

        for month in 1..=term_months {
            let interest_portion = balance.apply_rate(monthly_rate)?;
            let mut principal_portion = current_payment - interest_portion;

            if month == term_months {
                principal_portion = balance;
                current_payment = principal_portion + interest_portion;
            }

            balance -= principal_portion;
            if balance.is_negative() {
                warn!(month, %balance, "balance went negative, clamping to zero");
                balance = Money::ZERO;
            }

            entries.push(ScheduleEntry {
                month,
                payment: current_payment.round_cents(),
                principal_portion: principal_portion.round_cents(),
                interest_portion: interest_portion.round_cents(),
                remaining_balance: balance.round_cents(),
            });
        }

        debug!(
            %principal,
            term_months,
            %monthly_payment,
            entries = entries.len(),
            "generated amortization schedule"
        );

        Ok(entries)
    }
}

/// amortization schedule with running totals
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub entries: Vec<ScheduleEntry>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

impl AmortizationSchedule {
    /// generate a schedule for an already computed monthly payment
    pub fn generate(
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        monthly_payment: Money,
        config: PrecisionConfig,
    ) -> Result<Self> {
        let entries = ScheduleGenerator::new(config).generate_schedule(
            principal,
            annual_rate_percent,
            term_months,
            monthly_payment,
        )?;

        let total_payment: Money = entries.iter().map(|e| e.payment).sum();
        let total_interest: Money = entries.iter().map(|e| e.interest_portion).sum();
        let total_principal: Money = entries.iter().map(|e| e.principal_portion).sum();

        Ok(Self {
            principal,
            annual_rate_percent,
            term_months,
            monthly_payment,
            entries,
            total_payment,
            total_interest,
            total_principal,
        })
    }

    /// compute the payment from the terms, then generate the schedule
    pub fn from_terms(terms: &LoanTerms, config: PrecisionConfig) -> Result<Self> {
        let principal = terms
            .principal
            .ok_or(AmortizationError::MissingField { field: "principal" })?;
        let annual_rate_percent = terms
            .annual_rate_percent
            .ok_or(AmortizationError::MissingField { field: "annualRatePercent" })?;
        let term_months = terms
            .term_months
            .ok_or(AmortizationError::MissingField { field: "termMonths" })?;

        let monthly_payment = PaymentCalculator::new(config).calculate(terms)?.monthly_payment;
        Self::generate(principal, annual_rate_percent, term_months, monthly_payment, config)
    }

    /// entry for a 1-based month
    pub fn get_entry(&self, month: u32) -> Option<&ScheduleEntry> {
        month
            .checked_sub(1)
            .and_then(|index| self.entries.get(index as usize))
    }

    /// remaining balance after the given month; the principal before month 1
    pub fn balance_after(&self, month: u32) -> Money {
        self.get_entry(month)
            .map(|e| e.remaining_balance)
            .unwrap_or(self.principal)
    }

    pub fn final_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn entry(month: u32, payment: i64, principal: i64, interest: i64, balance: i64) -> ScheduleEntry {
        ScheduleEntry {
            month,
            payment: Money::from_cents(payment),
            principal_portion: Money::from_cents(principal),
            interest_portion: Money::from_cents(interest),
            remaining_balance: Money::from_cents(balance),
        }
    }

    #[test]
    fn test_personal_loan_schedule() {
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(10_000), dec!(12.0), 24, Money::from_cents(47_073))
            .unwrap();

        assert_eq!(entries.len(), 24);
        assert_eq!(entries[0], entry(1, 47_073, 37_073, 10_000, 962_927));
        assert_eq!(entries[1], entry(2, 47_073, 37_444, 9_629, 925_483));
        assert_eq!(entries[22], entry(23, 47_073, 46_145, 928, 46_620));

        // last month absorbs the rounding drift
        assert_eq!(entries[23], entry(24, 47_086, 46_620, 466, 0));
    }

    #[test]
    fn test_mortgage_schedule_closes_exactly() {
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(200_000), dec!(6.0), 360, Money::from_cents(119_910))
            .unwrap();

        assert_eq!(entries.len(), 360);
        assert_eq!(entries[0], entry(1, 119_910, 19_910, 100_000, 19_980_090));
        assert_eq!(entries[359], entry(360, 120_014, 119_417, 597, 0));
        assert_eq!(entries[359].remaining_balance.to_string(), "0.00");
    }

    #[test]
    fn test_zero_rate_schedule() {
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(12_000), dec!(0), 12, Money::from_major(1_000))
            .unwrap();

        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.interest_portion, Money::ZERO);
            assert_eq!(e.principal_portion, Money::from_major(1_000));
            assert_eq!(e.remaining_balance, Money::from_major(12_000 - 1_000 * (i as i64 + 1)));
        }
    }

    #[test]
    fn test_single_month_pays_everything() {
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(1_200), dec!(12), 1, Money::from_cents(121_200))
            .unwrap();

        assert_eq!(entries, vec![entry(1, 121_200, 120_000, 1_200, 0)]);
    }

    #[test]
    fn test_overpayment_clamps_balance() {
        // payment far above the loan: balance would go negative in month 1
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(100), dec!(0), 3, Money::from_major(500))
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.remaining_balance == Money::ZERO));
        assert_eq!(entries[2].payment, Money::ZERO);
    }

    #[test]
    fn test_zero_payment_still_closes() {
        let entries = ScheduleGenerator::default()
            .generate_schedule(Money::from_major(1_000), dec!(12), 2, Money::ZERO)
            .unwrap();

        // interest is capitalized in month 1, paid off in month 2
        assert_eq!(entries[0], entry(1, 0, -1_000, 1_000, 101_000));
        assert_eq!(entries[1], entry(2, 102_010, 101_000, 1_010, 0));
    }

    #[test]
    fn test_schedule_totals() {
        let schedule = AmortizationSchedule::generate(
            Money::from_major(10_000),
            dec!(12.0),
            24,
            Money::from_cents(47_073),
            PrecisionConfig::default(),
        )
        .unwrap();

        assert_eq!(schedule.total_principal, Money::from_major(10_000));
        assert_eq!(schedule.total_payment, Money::from_cents(1_129_765));
        assert_eq!(schedule.total_interest, Money::from_cents(129_765));
        assert_eq!(schedule.total_payment, schedule.total_principal + schedule.total_interest);
    }

    #[test]
    fn test_from_terms() {
        let terms = LoanTerms::new(Money::from_major(10_000), dec!(12.0), 24);
        let schedule = AmortizationSchedule::from_terms(&terms, PrecisionConfig::default()).unwrap();

        assert_eq!(schedule.monthly_payment, Money::from_cents(47_073));
        assert_eq!(schedule.get_entry(1).unwrap().interest_portion, Money::from_major(100));
        assert!(schedule.get_entry(0).is_none());
        assert!(schedule.get_entry(25).is_none());
        assert_eq!(schedule.balance_after(0), Money::from_major(10_000));
        assert_eq!(schedule.balance_after(2), Money::from_cents(925_483));
        assert_eq!(schedule.final_entry().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_from_terms_requires_all_fields() {
        let terms = LoanTerms {
            annual_rate_percent: None,
            ..LoanTerms::new(Money::from_major(10_000), dec!(12.0), 24)
        };
        let err = AmortizationSchedule::from_terms(&terms, PrecisionConfig::default()).unwrap_err();
        assert!(matches!(err, AmortizationError::MissingField { field: "annualRatePercent" }));
    }

    #[test]
    fn test_generation_is_repeatable() {
        let generator = ScheduleGenerator::default();
        let first = generator
            .generate_schedule(Money::from_major(25_000), dec!(5.0), 60, Money::from_cents(47_178))
            .unwrap();
        let second = generator
            .generate_schedule(Money::from_major(25_000), dec!(5.0), 60, Money::from_cents(47_178))
            .unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_schedule_retires_balance(
            cents in 1_000_000i64..=100_000_000,
            rate_bps in 0i64..=2_500,
            term in 1u32..=480,
        ) {
            let principal = Money::from_cents(cents);
            let rate = Decimal::new(rate_bps, 2);
            let calc = PaymentCalculator::default();
            let payment = calc
                .calculate_monthly_payment(Some(principal), Some(rate), Some(term))
                .unwrap();

            let entries = ScheduleGenerator::default()
                .generate_schedule(principal, rate, term, payment)
                .unwrap();

            prop_assert_eq!(entries.len(), term as usize);
            prop_assert_eq!(entries.last().unwrap().remaining_balance, Money::ZERO);

            let mut previous = principal;
            for (i, e) in entries.iter().enumerate() {
                prop_assert_eq!(e.month, i as u32 + 1);
                prop_assert!(!e.remaining_balance.is_negative());
                prop_assert!(e.remaining_balance <= previous);
                previous = e.remaining_balance;
            }
        }

        #[test]
        fn prop_zero_rate_is_straight_line(
            cents in 0i64..=100_000_000,
            term in 1u32..=480,
        ) {
            let principal = Money::from_cents(cents);
            let payment = PaymentCalculator::default()
                .calculate_monthly_payment(Some(principal), Some(Decimal::ZERO), Some(term))
                .unwrap();

            let expected = crate::decimal::round_half_up(
                principal.as_decimal() / Decimal::from(term),
                2,
            );
            prop_assert_eq!(payment.as_decimal(), expected);
        }
    }
}
