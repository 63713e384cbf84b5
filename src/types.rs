use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a property
pub type PropertyId = Uuid;

/// unique identifier for a tenant lease
pub type LeaseId = Uuid;

/// unique identifier for a rent payment period
pub type PaymentId = Uuid;

/// unique identifier for a generated document
pub type DocumentId = Uuid;

/// payment status for one billing period
///
/// Derived from stored facts on every read, never persisted as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// period open, due date not yet passed
    Pending,
    /// payment date and method recorded
    Paid,
    /// past due date with no payment recorded
    Overdue,
}

/// invoice status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Overdue,
}

/// outcome status on a recorded reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    /// delivered to at least the requested channel(s)
    Sent,
    /// queued or partially delivered
    Pending,
    /// the underlying payment was settled after the reminder
    Resolved,
}

/// how a reminder is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderMethod {
    Email,
    Sms,
    /// both email and sms; each sub-send is attempted independently
    Both,
}

impl ReminderMethod {
    /// the concrete channels this method fans out to
    pub fn channels(&self) -> &'static [ReminderChannel] {
        match self {
            ReminderMethod::Email => &[ReminderChannel::Email],
            ReminderMethod::Sms => &[ReminderChannel::Sms],
            ReminderMethod::Both => &[ReminderChannel::Email, ReminderChannel::Sms],
        }
    }
}

/// a single concrete notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderChannel {
    Email,
    Sms,
}

/// how a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Mpesa,
    BankTransfer,
    Cash,
    Cheque,
}

/// lease status, derived from lease dates on every read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseStatus {
    /// running, end date beyond the expiry horizon
    Active,
    /// end date within the expiry horizon
    Expiring,
    /// end date has passed
    Expired,
}

/// property type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
    MixedUse,
}

/// a property manager contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub name: String,
    pub phone: String,
}

/// maintenance request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Open,
    InProgress,
    Closed,
}
