use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{BillingError, Result};
use crate::reports::{MonthWindow, BUCKETS};
use crate::store::OccupancySource;

/// occupancy rate tied to revenue, per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyImpact {
    /// occupancy fractions in [0,1]
    pub rates: [Rate; BUCKETS],
    pub revenue: [Money; BUCKETS],
    /// revenue divided by the floored occupancy rate
    pub revenue_per_available_unit: [Money; BUCKETS],
}

impl OccupancyImpact {
    /// tie the occupancy series to the revenue series
    ///
    /// The divisor is floored so a month with zero recorded occupancy
    /// yields a large-but-finite figure instead of leaking a division by
    /// zero into the report.
    pub fn build(
        window: &MonthWindow,
        revenue: &[Money; BUCKETS],
        occupancy: &dyn OccupancySource,
        floor: Rate,
    ) -> Result<Self> {
        let rates = occupancy.monthly_rates(window);
        if rates.len() != BUCKETS {
            return Err(BillingError::AggregationInput {
                message: format!("occupancy source returned {} buckets, expected {BUCKETS}", rates.len()),
            });
        }
        if floor.is_zero() {
            return Err(BillingError::AggregationInput {
                message: "occupancy floor must be positive".to_string(),
            });
        }
        if let Some(bad) = rates
            .iter()
            .find(|r| r.as_fraction().is_sign_negative() || **r > Rate::ONE)
        {
            return Err(BillingError::AggregationInput {
                message: format!("occupancy rate out of range: {bad}"),
            });
        }

        let mut rate_array = [Rate::ZERO; BUCKETS];
        rate_array.copy_from_slice(&rates);

        let mut per_unit = [Money::ZERO; BUCKETS];
        for i in 0..BUCKETS {
            let divisor = rate_array[i].max(floor);
            per_unit[i] = revenue[i] / divisor.as_fraction();
        }

        Ok(Self {
            rates: rate_array,
            revenue: *revenue,
            revenue_per_available_unit: per_unit,
        })
    }
}
