use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{AmortizationError, Result};

/// fractional digits of every currency amount the calculators emit
pub const CURRENCY_DP: u32 = 2;

/// round half-up (ties away from zero) to `dp` fractional digits
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// divide, then round the quotient half-up to exactly `scale` fractional digits
pub fn div_half_up(numerator: Decimal, denominator: Decimal, scale: u32) -> Result<Decimal> {
    let quotient = numerator
        .checked_div(denominator)
        .ok_or_else(|| AmortizationError::CalculationError {
            message: format!("cannot divide {} by {}", numerator, denominator),
        })?;
    Ok(round_half_up(quotient, scale))
}

/// raise `base` to an integer power, keeping `precision` significant digits
///
/// Squares and multiplies at full 96-bit working precision, then rounds the
/// result half-up to the requested number of significant digits. Overflow is
/// reported rather than panicking.
pub fn pow_significant(base: Decimal, exp: u32, precision: u32) -> Result<Decimal> {
    let overflow = || AmortizationError::CalculationError {
        message: format!("{}^{} overflows decimal range", base, exp),
    };

    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = exp;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(square).ok_or_else(overflow)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.checked_mul(square).ok_or_else(overflow)?;
        }
    }

    result
        .round_sf_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        .ok_or_else(|| AmortizationError::CalculationError {
            message: format!("cannot round {} to {} significant digits", result, precision),
        })
}

/// currency amount
///
/// Arithmetic is exact; rounding to cents only happens where a calculation
/// explicitly asks for it via [`Money::round_cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal, keeping its scale
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s)?))
    }

    /// create from whole currency units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_DP))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half-up to two fractional digits, always carrying scale 2
    pub fn round_cents(&self) -> Self {
        let mut rounded = round_half_up(self.0, CURRENCY_DP);
        rounded.rescale(CURRENCY_DP);
        Money(rounded)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// multiply by a rate, rounding the product half-up to cents
    pub fn apply_rate(&self, rate: Rate) -> Result<Self> {
        let product = self
            .0
            .checked_mul(rate.as_decimal())
            .ok_or_else(|| AmortizationError::CalculationError {
                message: format!("{} * {} overflows decimal range", self.0, rate.as_decimal()),
            })?;
        Ok(Money(product).round_cents())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// interest rate held as a decimal fraction (0.06 for 6%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal fraction (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage (e.g., 6.0 for 6%), rounded half-up to `scale` digits
    pub fn from_percent(percent: Decimal, scale: u32) -> Result<Self> {
        Ok(Rate(div_half_up(percent, Decimal::ONE_HUNDRED, scale)?))
    }

    /// monthly rate from annual rate, rounded half-up to `scale` digits
    pub fn monthly(&self, scale: u32) -> Result<Rate> {
        Ok(Rate(div_half_up(self.0, Decimal::from(12), scale)?))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}
