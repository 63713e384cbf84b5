use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// profitability figures, all fractions in [0,1]
///
/// Percentage conversion happens once, at the presentation boundary
/// (`Rate::as_percentage`); nothing here bakes in a times-100 scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityMetrics {
    pub gross_margin: Rate,
    pub net_margin: Rate,
    pub roi: Rate,
}

impl ProfitabilityMetrics {
    /// compute margins and roi from window totals
    ///
    /// Zero revenue or zero investment produce zero fractions; a losing
    /// window floors at zero rather than going negative.
    pub fn compute(
        revenue: Money,
        direct_costs: Money,
        total_costs: Money,
        investment: Money,
    ) -> Self {
        let gross_margin = margin(revenue, direct_costs);
        let net_margin = margin(revenue, total_costs);
        let roi = if investment.is_zero() || !(revenue - total_costs).is_positive() {
            Rate::ZERO
        } else {
            Rate::from_fraction((revenue - total_costs).as_decimal() / investment.as_decimal())
                .min(Rate::ONE)
        };

        Self {
            gross_margin,
            net_margin,
            roi,
        }
    }
}

fn margin(revenue: Money, costs: Money) -> Rate {
    if revenue.is_zero() {
        return Rate::ZERO;
    }
    let profit = revenue - costs;
    if !profit.is_positive() {
        return Rate::ZERO;
    }
    Rate::from_fraction(profit.as_decimal() / revenue.as_decimal())
}
