use serde::{Deserialize, Serialize};

use crate::errors::{AmortizationError, Result};

/// widest scale a 96-bit decimal can carry
const MAX_DECIMAL_DIGITS: u32 = 28;

/// minimum fractional digits for rate divisions
pub const MIN_RATE_SCALE: u32 = 10;

/// minimum significant digits for the `(1 + r)^n` factor
pub const MIN_POWER_PRECISION: u32 = 20;

/// working precision of the payment and schedule calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisionConfig {
    /// fractional digits kept when dividing the percentage by 100 and the annual rate by 12
    pub rate_scale: u32,
    /// significant digits kept for the compounding factor
    pub power_precision: u32,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            rate_scale: MIN_RATE_SCALE,
            power_precision: MIN_POWER_PRECISION,
        }
    }
}

impl PrecisionConfig {
    /// create a validated configuration
    pub fn new(rate_scale: u32, power_precision: u32) -> Result<Self> {
        let config = Self {
            rate_scale,
            power_precision,
        };
        config.validate()?;
        Ok(config)
    }

    /// load from a json document; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_RATE_SCALE..=MAX_DECIMAL_DIGITS).contains(&self.rate_scale) {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "rate_scale must be between {} and {}, got {}",
                    MIN_RATE_SCALE, MAX_DECIMAL_DIGITS, self.rate_scale
                ),
            });
        }

        if !(MIN_POWER_PRECISION..=MAX_DECIMAL_DIGITS).contains(&self.power_precision) {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "power_precision must be between {} and {}, got {}",
                    MIN_POWER_PRECISION, MAX_DECIMAL_DIGITS, self.power_precision
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PrecisionConfig::default();
        assert_eq!(config.rate_scale, 10);
        assert_eq!(config.power_precision, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(PrecisionConfig::new(9, 20).is_err());
        assert!(PrecisionConfig::new(10, 19).is_err());
        assert!(PrecisionConfig::new(29, 20).is_err());
        assert!(PrecisionConfig::new(12, 28).is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = PrecisionConfig::from_json(r#"{"rate_scale": 14}"#).unwrap();
        assert_eq!(config.rate_scale, 14);
        assert_eq!(config.power_precision, 20);

        let err = PrecisionConfig::from_json(r#"{"power_precision": 4}"#).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfiguration { .. }));

        let err = PrecisionConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, AmortizationError::Json(_)));
    }
}
