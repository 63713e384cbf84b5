pub mod utility;

use serde::{Deserialize, Serialize};

use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payment::RentPayment;

pub use utility::UtilityTariff;

/// one priced line on an invoice or receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// itemized charges for one billing period
///
/// Amounts stay unrounded through every sum; presentation rounding belongs
/// to the render boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    pub rent: Money,
    pub water: Money,
    pub fixed_fees: Vec<LineItem>,
}

impl ChargeBreakdown {
    /// total due: rent + utility + every flat fee
    pub fn total_due(&self) -> Money {
        self.rent + self.water + self.fixed_fees.iter().map(|f| f.amount).sum::<Money>()
    }

    /// all lines in render order: rent, water, then flat fees
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = vec![
            LineItem::new("Rent", self.rent),
            LineItem::new("Water", self.water),
        ];
        items.extend(self.fixed_fees.iter().cloned());
        items
    }
}

/// compute a period's charges from its record and the billing configuration
///
/// A period without a meter reading is billed zero for water; that is a
/// normal case, not an error.
pub fn compute_charges(payment: &RentPayment, config: &BillingConfig) -> Result<ChargeBreakdown> {
    let water = match &payment.water_meter_reading {
        Some(reading) => UtilityTariff::new(config.water_unit_rate).charge(reading)?,
        None => Money::ZERO,
    };

    Ok(ChargeBreakdown {
        rent: payment.rent_amount,
        water,
        fixed_fees: config
            .fixed_fees
            .iter()
            .map(|f| LineItem::new(f.label.clone(), f.amount))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::events::EventStore;
    use crate::payment::WaterMeterReading;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment_with_reading(rent: i64, previous: rust_decimal::Decimal, current: rust_decimal::Decimal) -> RentPayment {
        let mut events = EventStore::new();
        let mut payment = RentPayment::open(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "101",
            Money::from_major(rent),
            date(2024, 5, 1),
            &mut events,
        )
        .unwrap();
        let reading =
            WaterMeterReading::new(payment.id, previous, current, date(2024, 4, 25)).unwrap();
        payment.record_reading(reading, &mut events).unwrap();
        payment
    }

    #[test]
    fn test_rent_plus_water_plus_garbage() {
        let config = BillingConfig::standard(Money::from_major(100), Money::from_major(300));
        let payment = payment_with_reading(50_000, dec!(100), dec!(150));

        let charges = compute_charges(&payment, &config).unwrap();
        assert_eq!(charges.rent, Money::from_major(50_000));
        assert_eq!(charges.water, Money::from_major(5_000));
        assert_eq!(charges.total_due(), Money::from_major(55_300));
    }

    #[test]
    fn test_missing_reading_bills_zero_water() {
        let config = BillingConfig::standard(Money::from_major(100), Money::from_major(300));
        let mut events = EventStore::new();
        let payment = RentPayment::open(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "101",
            Money::from_major(20_000),
            date(2024, 5, 1),
            &mut events,
        )
        .unwrap();

        let charges = compute_charges(&payment, &config).unwrap();
        assert_eq!(charges.water, Money::ZERO);
        assert_eq!(charges.total_due(), Money::from_major(20_300));
    }

    #[test]
    fn test_no_fees_total_is_pure_sum() {
        let config = BillingConfig::rent_only();
        let payment = payment_with_reading(50_000, dec!(100), dec!(150));

        let charges = compute_charges(&payment, &config).unwrap();
        // rent-only config has a zero unit rate, so water is free
        assert_eq!(charges.water, Money::ZERO);
        assert_eq!(charges.total_due(), Money::from_major(50_000));
    }

    #[test]
    fn test_line_items_order_is_stable() {
        let config = BillingConfig::standard(Money::from_major(100), Money::from_major(300));
        let payment = payment_with_reading(50_000, dec!(100), dec!(150));

        let items = compute_charges(&payment, &config).unwrap().line_items();
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Rent", "Water", "Garbage"]);
    }
}
