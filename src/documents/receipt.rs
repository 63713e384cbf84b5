use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::LineItem;
use crate::decimal::Money;
use crate::documents::render::PortableDocument;
use crate::documents::WaterUsage;
use crate::types::{DocumentId, PaymentId, PaymentMethod};

/// a receipt for a fully paid period
///
/// Receipts only exist for Paid payments, so the pending balance is always
/// zero; there are no partial-payment receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: DocumentId,
    pub payment_id: PaymentId,
    pub tenant_name: String,
    pub property_name: String,
    pub unit: String,
    pub paid_amount: Money,
    pub pending_balance: Money,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub water_usage: Option<WaterUsage>,
}

impl Receipt {
    /// logical document content for the render collaborator
    pub fn to_portable(&self, currency: &str) -> PortableDocument {
        PortableDocument {
            title: "Receipt".to_string(),
            number: self.id,
            date: self.payment_date,
            tenant: self.tenant_name.clone(),
            property: self.property_name.clone(),
            unit: self.unit.clone(),
            items: vec![
                LineItem::new("Paid Amount", self.paid_amount),
                LineItem::new("Pending Balance", self.pending_balance),
            ],
            total: self.paid_amount,
            currency: currency.to_string(),
            water_note: self.water_usage.as_ref().map(WaterUsage::note),
        }
    }
}
