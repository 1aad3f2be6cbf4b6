use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PrecisionConfig;
use crate::decimal::{div_half_up, pow_significant, Money, Rate, CURRENCY_DP};
use crate::errors::{AmortizationError, Result};
use crate::types::{LoanTerms, PaymentResult};

/// fixed monthly payment calculator
///
/// Applies `P * r * (1 + r)^n / ((1 + r)^n - 1)` with the rate divisions and
/// the compounding factor held at the precision of its [`PrecisionConfig`].
/// A zero rate degrades to straight-line division of the principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCalculator {
    config: PrecisionConfig,
}

impl PaymentCalculator {
    pub fn new(config: PrecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrecisionConfig {
        &self.config
    }

    /// calculate the monthly payment for a terms snapshot
    pub fn calculate(&self, terms: &LoanTerms) -> Result<PaymentResult> {
        let monthly_payment = self.calculate_monthly_payment(
            terms.principal,
            terms.annual_rate_percent,
            terms.term_months,
        )?;
        Ok(PaymentResult { monthly_payment })
    }

    /// calculate the monthly payment, rounded half-up to cents
    ///
    /// Returns zero when any input is missing. A zero term is a caller error
    /// and surfaces as [`AmortizationError::CalculationError`].
    pub fn calculate_monthly_payment(
        &self,
        principal: Option<Money>,
        annual_rate_percent: Option<Decimal>,
        term_months: Option<u32>,
    ) -> Result<Money> {
        let (principal, annual_rate_percent, term_months) =
            match (principal, annual_rate_percent, term_months) {
                (Some(p), Some(r), Some(n)) => (p, r, n),
                _ => return Ok(Money::ZERO.round_cents()),
            };

        let annual_rate = Rate::from_percent(annual_rate_percent, self.config.rate_scale)?;
        let n = Decimal::from(term_months);

        let payment = if annual_rate.is_zero() {
            div_half_up(principal.as_decimal(), n, CURRENCY_DP)?
        } else {
            let r = annual_rate.monthly(self.config.rate_scale)?.as_decimal();
            let compound = pow_significant(Decimal::ONE + r, term_months, self.config.power_precision)?;

            let numerator = principal
                .as_decimal()
                .checked_mul(r)
                .and_then(|x| x.checked_mul(compound))
                .ok_or_else(|| AmortizationError::CalculationError {
                    message: format!("payment numerator overflows for principal {}", principal),
                })?;
            let denominator = compound - Decimal::ONE;

            div_half_up(numerator, denominator, CURRENCY_DP)?
        };

        let monthly_payment = Money::from_decimal(payment).round_cents();
        debug!(
            %principal,
            rate = %annual_rate,
            term_months,
            %monthly_payment,
            "computed monthly payment"
        );

        Ok(monthly_payment)
    }
}

/// calculate the monthly payment with the default precision
pub fn calculate_monthly_payment(
    principal: Option<Money>,
    annual_rate_percent: Option<Decimal>,
    term_months: Option<u32>,
) -> Result<Money> {
    PaymentCalculator::default().calculate_monthly_payment(principal, annual_rate_percent, term_months)
}
