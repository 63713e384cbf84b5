use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::payment::WaterMeterReading;

/// per-unit tariff for metered water
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityTariff {
    pub unit_rate: Money,
}

impl UtilityTariff {
    pub fn new(unit_rate: Money) -> Self {
        Self { unit_rate }
    }

    /// charge for one reading: usage times the unit rate
    ///
    /// Readings are validated at construction, but deserialized data comes
    /// through here too, so the usage invariant is checked again rather
    /// than clamped.
    pub fn charge(&self, reading: &WaterMeterReading) -> Result<Money> {
        if reading.current_reading < reading.previous_reading {
            return Err(BillingError::InvalidReading {
                previous: reading.previous_reading,
                current: reading.current_reading,
            });
        }

        Ok(self.unit_rate * reading.usage())
    }
}
