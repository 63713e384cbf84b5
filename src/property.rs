use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{BillingError, Result};
use crate::types::{LeaseId, Manager, PropertyId, PropertyType};

/// a managed property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub location: String,
    pub property_type: PropertyType,
    pub unit_count: u32,
    pub rent_per_unit: Money,
    pub acquisition_date: NaiveDate,
    pub amenities: BTreeSet<String>,
    pub nearby_facilities: BTreeSet<String>,
    pub managers: Vec<Manager>,
}

impl Property {
    /// create a property, validating the onboarding invariants
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        property_type: PropertyType,
        unit_count: u32,
        rent_per_unit: Money,
        acquisition_date: NaiveDate,
        managers: Vec<Manager>,
    ) -> Result<Self> {
        if unit_count == 0 {
            return Err(BillingError::InvalidConfiguration {
                message: "property must have at least one unit".to_string(),
            });
        }
        if !rent_per_unit.is_positive() {
            return Err(BillingError::InvalidAmount {
                amount: rent_per_unit,
            });
        }
        if managers.is_empty() {
            return Err(BillingError::InvalidConfiguration {
                message: "property needs at least one manager".to_string(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: location.into(),
            property_type,
            unit_count,
            rent_per_unit,
            acquisition_date,
            amenities: BTreeSet::new(),
            nearby_facilities: BTreeSet::new(),
            managers,
        })
    }

    /// units covered by a lease on the given day
    ///
    /// Computed from lease dates on every call; occupancy is never stored.
    pub fn occupied_units(&self, leases: &[Lease], today: NaiveDate) -> u32 {
        leases
            .iter()
            .filter(|l| l.property_id == self.id && l.covers(today))
            .count() as u32
    }

    /// occupancy rate as a fraction of all units
    pub fn occupancy_rate(&self, leases: &[Lease], today: NaiveDate) -> Rate {
        let occupied = self.occupied_units(leases, today).min(self.unit_count);
        Rate::from_fraction(Decimal::from(occupied) / Decimal::from(self.unit_count))
    }

    /// computed occupancy snapshot for dashboards
    pub fn occupancy_snapshot(&self, leases: &[Lease], today: NaiveDate) -> PropertyOccupancy {
        let occupied = self.occupied_units(leases, today).min(self.unit_count);
        let active: Vec<&Lease> = leases
            .iter()
            .filter(|l| l.property_id == self.id && l.covers(today))
            .collect();
        let average_rent = if active.is_empty() {
            self.rent_per_unit
        } else {
            active.iter().map(|l| l.rent_amount).sum::<Money>()
                / Decimal::from(active.len() as u32)
        };

        PropertyOccupancy {
            property_id: self.id,
            name: self.name.clone(),
            total_units: self.unit_count,
            occupied_units: occupied,
            occupancy_rate: self.occupancy_rate(leases, today),
            average_rent,
        }
    }
}

/// occupancy snapshot for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOccupancy {
    pub property_id: PropertyId,
    pub name: String,
    pub total_units: u32,
    pub occupied_units: u32,
    pub occupancy_rate: Rate,
    pub average_rent: Money,
}

/// tenant contact details captured at onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_number: String,
}

/// a tenancy over one unit of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: LeaseId,
    pub property_id: PropertyId,
    pub tenant: TenantContact,
    pub unit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Money,
    pub security_deposit: Money,
    pub occupants: u32,
    pub pets: bool,
}

impl Lease {
    /// create a lease, validating the date and amount invariants
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property_id: PropertyId,
        tenant: TenantContact,
        unit: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rent_amount: Money,
        security_deposit: Money,
        occupants: u32,
        pets: bool,
    ) -> Result<Self> {
        if end_date <= start_date {
            return Err(BillingError::InvalidLeaseDates {
                start: start_date,
                end: end_date,
            });
        }
        if !rent_amount.is_positive() {
            return Err(BillingError::InvalidAmount {
                amount: rent_amount,
            });
        }
        if security_deposit.is_negative() {
            return Err(BillingError::InvalidAmount {
                amount: security_deposit,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            property_id,
            tenant,
            unit: unit.into(),
            start_date,
            end_date,
            rent_amount,
            security_deposit,
            occupants,
            pets,
        })
    }

    /// whether the lease covers the given day
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// days until the lease ends; negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }
}
