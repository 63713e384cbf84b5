use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Rate;
use crate::types::{MaintenanceStatus, PropertyId};

/// a maintenance request against one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub property_id: PropertyId,
    pub unit: String,
    pub description: String,
    pub status: MaintenanceStatus,
    pub created_on: NaiveDate,
    pub last_updated_on: NaiveDate,
}

impl MaintenanceRequest {
    pub fn open(
        property_id: PropertyId,
        unit: impl Into<String>,
        description: impl Into<String>,
        created_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            unit: unit.into(),
            description: description.into(),
            status: MaintenanceStatus::Open,
            created_on,
            last_updated_on: created_on,
        }
    }

    pub fn transition(&mut self, status: MaintenanceStatus, on: NaiveDate) {
        self.status = status;
        self.last_updated_on = on;
    }
}

/// open-request summary for the manager dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceSummary {
    pub total: u32,
    pub open: u32,
    /// open share of all requests, as a fraction
    pub open_share: Rate,
}

impl MaintenanceSummary {
    pub fn compute(requests: &[MaintenanceRequest]) -> Self {
        let total = requests.len() as u32;
        let open = requests
            .iter()
            .filter(|r| r.status == MaintenanceStatus::Open)
            .count() as u32;
        let open_share = if total == 0 {
            Rate::ZERO
        } else {
            Rate::from_fraction(
                rust_decimal::Decimal::from(open) / rust_decimal::Decimal::from(total),
            )
        };

        Self {
            total,
            open,
            open_share,
        }
    }
}
