use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{BillingError, Result};

/// a flat per-period fee (garbage collection, service charge, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedFee {
    pub label: String,
    pub amount: Money,
}

impl FixedFee {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// billing configuration shared by the calculator, documents and reminders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// price per metered water unit
    pub water_unit_rate: Money,
    /// flat fees added to every period's total
    pub fixed_fees: Vec<FixedFee>,
    /// currency label used in messages and rendered documents
    pub currency: String,
    /// days before the due date at which automatic reminders start
    pub reminder_window_days: i64,
    /// days before lease end at which a lease reads as expiring
    pub lease_expiry_horizon_days: i64,
    /// floor applied to occupancy rates when dividing revenue by them
    pub occupancy_floor: Rate,
}

impl BillingConfig {
    /// standard configuration: metered water, flat garbage fee, KES
    pub fn standard(water_unit_rate: Money, garbage_fee: Money) -> Self {
        Self {
            water_unit_rate,
            fixed_fees: vec![FixedFee::new("Garbage", garbage_fee)],
            currency: "KES".to_string(),
            reminder_window_days: 5,
            lease_expiry_horizon_days: 30,
            occupancy_floor: Rate::from_fraction(dec!(0.01)),
        }
    }

    /// configuration with no metered utility and no flat fees
    pub fn rent_only() -> Self {
        Self {
            water_unit_rate: Money::ZERO,
            fixed_fees: Vec::new(),
            currency: "KES".to_string(),
            reminder_window_days: 5,
            lease_expiry_horizon_days: 30,
            occupancy_floor: Rate::from_fraction(dec!(0.01)),
        }
    }

    /// total of all configured flat fees
    pub fn fixed_fee_total(&self) -> Money {
        self.fixed_fees.iter().map(|f| f.amount).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.water_unit_rate.is_negative() {
            return Err(BillingError::InvalidConfiguration {
                message: format!("water unit rate cannot be negative: {}", self.water_unit_rate),
            });
        }
        if let Some(fee) = self.fixed_fees.iter().find(|f| f.amount.is_negative()) {
            return Err(BillingError::InvalidConfiguration {
                message: format!("fixed fee {} cannot be negative: {}", fee.label, fee.amount),
            });
        }
        if self.reminder_window_days < 0 || self.lease_expiry_horizon_days < 0 {
            return Err(BillingError::InvalidConfiguration {
                message: "reminder window and expiry horizon must be non-negative".to_string(),
            });
        }
        if self.occupancy_floor.as_fraction() <= Decimal::ZERO {
            return Err(BillingError::InvalidConfiguration {
                message: "occupancy floor must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config_validates() {
        let config = BillingConfig::standard(Money::from_major(100), Money::from_major(300));
        assert!(config.validate().is_ok());
        assert_eq!(config.fixed_fee_total(), Money::from_major(300));
        assert_eq!(config.reminder_window_days, 5);
    }

    #[test]
    fn test_negative_unit_rate_rejected() {
        let mut config = BillingConfig::rent_only();
        config.water_unit_rate = Money::from_major(-5);
        assert!(matches!(
            config.validate(),
            Err(BillingError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_occupancy_floor_rejected() {
        let mut config = BillingConfig::rent_only();
        config.occupancy_floor = Rate::ZERO;
        assert!(config.validate().is_err());
    }
}
