use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::ChargeBreakdown;
use crate::decimal::Money;
use crate::documents::render::PortableDocument;
use crate::documents::WaterUsage;
use crate::types::{DocumentId, InvoiceStatus, PaymentId, PaymentStatus};

/// an invoice: a snapshot of one period's charges at generation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: DocumentId,
    pub payment_id: PaymentId,
    pub tenant_name: String,
    pub property_name: String,
    pub unit: String,
    pub charges: ChargeBreakdown,
    pub total: Money,
    pub due_date: NaiveDate,
    pub issued_on: NaiveDate,
    pub status: InvoiceStatus,
    pub water_usage: Option<WaterUsage>,
}

impl Invoice {
    /// logical document content for the render collaborator
    pub fn to_portable(&self, currency: &str) -> PortableDocument {
        PortableDocument {
            title: "Invoice".to_string(),
            number: self.id,
            date: self.issued_on,
            tenant: self.tenant_name.clone(),
            property: self.property_name.clone(),
            unit: self.unit.clone(),
            items: self.charges.line_items(),
            total: self.total,
            currency: currency.to_string(),
            water_note: self.water_usage.as_ref().map(WaterUsage::note),
        }
    }
}

/// invoice status mirrors the payment's derived status at generation time
pub fn invoice_status_for(payment_status: PaymentStatus) -> InvoiceStatus {
    match payment_status {
        PaymentStatus::Paid => InvoiceStatus::Paid,
        PaymentStatus::Overdue => InvoiceStatus::Overdue,
        PaymentStatus::Pending => InvoiceStatus::Unpaid,
    }
}
