pub mod batch;
pub mod billing;
pub mod config;
pub mod decimal;
pub mod documents;
pub mod errors;
pub mod events;
pub mod maintenance;
pub mod notify;
pub mod payment;
pub mod property;
pub mod reminders;
pub mod reports;
pub mod status;
pub mod store;
pub mod types;

// re-export key types
pub use batch::{AbortFlag, BatchReport};
pub use billing::{compute_charges, ChargeBreakdown, LineItem, UtilityTariff};
pub use config::{BillingConfig, FixedFee};
pub use decimal::{Money, Rate};
pub use documents::{
    dispatch_document, DocumentGenerator, DocumentRenderer, Invoice, PortableDocument, Receipt,
    WaterUsage,
};
pub use errors::{BillingError, Result};
pub use events::{Event, EventStore};
pub use notify::{ChannelOutcome, DispatchOutcome, Notifier};
pub use payment::{RentPayment, WaterMeterReading};
pub use property::{Lease, Property, PropertyOccupancy, TenantContact};
pub use reminders::{RecordOutcome, Reminder, ReminderDispatcher, ReminderOptions};
pub use reports::{
    CashFlowReport, DocumentSummary, DocumentTrends, ExpenseBreakdown, FinancialReport,
    MonthWindow, OccupancyImpact, PaymentTrends, ProfitabilityMetrics, ReportInputs,
};
pub use status::{is_late, late_days, lease_status, resolve_status};
pub use store::{ExpenseEntry, ExpenseLedger, InMemoryDirectory, OccupancySource, PartyDirectory};
pub use types::{
    InvoiceStatus, LeaseStatus, Manager, PaymentMethod, PaymentStatus, PropertyType,
    ReminderChannel, ReminderMethod, ReminderStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
