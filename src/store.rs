//! Collaborator seams.
//!
//! The core computes over snapshots; fetching and persisting them is the
//! host application's job. These traits are the only shape the core knows
//! about its collaborators, and the crate ships no production
//! implementation of any of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::property::{Lease, Property};
use crate::reports::MonthWindow;
use crate::types::{LeaseId, PropertyId};

/// read access to the parties behind a payment record
///
/// Document generation resolves tenant and property references through
/// this seam; an unresolvable reference becomes `MissingBillingData`.
pub trait PartyDirectory {
    fn lease(&self, id: LeaseId) -> Option<Lease>;
    fn property(&self, id: PropertyId) -> Option<Property>;
}

/// one dated, categorized expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
}

/// read access to the expense ledger used by cash-flow and expense reports
pub trait ExpenseLedger {
    fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<ExpenseEntry>;
}

/// read access to recorded occupancy rates, one fraction per month bucket
pub trait OccupancySource {
    fn monthly_rates(&self, window: &MonthWindow) -> Vec<Rate>;
}

/// in-memory directory, for tests and examples
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    pub leases: Vec<Lease>,
    pub properties: Vec<Property>,
}

impl PartyDirectory for InMemoryDirectory {
    fn lease(&self, id: LeaseId) -> Option<Lease> {
        self.leases.iter().find(|l| l.id == id).cloned()
    }

    fn property(&self, id: PropertyId) -> Option<Property> {
        self.properties.iter().find(|p| p.id == id).cloned()
    }
}
