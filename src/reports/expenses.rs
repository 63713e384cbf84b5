use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::reports::MonthWindow;
use crate::store::ExpenseLedger;

/// one category's slice of the expense pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: Money,
    /// percentage share of all categories; shares sum to 100
    pub share: Decimal,
}

/// per-category expense amounts with percentage shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub entries: Vec<ExpenseShare>,
    pub total: Money,
}

impl ExpenseBreakdown {
    /// compute shares from a non-empty category map
    pub fn compute(categories: &BTreeMap<String, Money>) -> Result<Self> {
        if categories.is_empty() {
            return Err(BillingError::AggregationInput {
                message: "expense breakdown needs at least one category".to_string(),
            });
        }
        if let Some((category, amount)) = categories.iter().find(|(_, a)| a.is_negative()) {
            return Err(BillingError::AggregationInput {
                message: format!("negative expense amount for {category}: {amount}"),
            });
        }

        let total: Money = categories.values().copied().sum();
        if total.is_zero() {
            return Err(BillingError::AggregationInput {
                message: "expense categories sum to zero".to_string(),
            });
        }

        let entries = categories
            .iter()
            .map(|(category, amount)| ExpenseShare {
                category: category.clone(),
                amount: *amount,
                share: amount.as_decimal() / total.as_decimal() * Decimal::from(100),
            })
            .collect();

        Ok(Self { entries, total })
    }

    /// fold the ledger's window entries into categories, then compute
    pub fn from_ledger(window: &MonthWindow, ledger: &dyn ExpenseLedger) -> Result<Self> {
        let mut categories: BTreeMap<String, Money> = BTreeMap::new();
        for entry in ledger.entries_between(window.start_date(), window.end_date()) {
            *categories.entry(entry.category).or_insert(Money::ZERO) += entry.amount;
        }
        Self::compute(&categories)
    }
}
