use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{
    DocumentId, PaymentId, PaymentMethod, PaymentStatus, ReminderChannel, ReminderStatus,
};

/// all events emitted by billing lifecycle operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // period lifecycle
    PeriodOpened {
        payment_id: PaymentId,
        due_date: NaiveDate,
        rent_amount: Money,
    },
    ReadingRecorded {
        payment_id: PaymentId,
        previous: Decimal,
        current: Decimal,
        usage: Decimal,
        reading_date: NaiveDate,
    },
    PaymentRecorded {
        payment_id: PaymentId,
        amount: Money,
        method: PaymentMethod,
        payment_date: NaiveDate,
    },
    StatusChanged {
        payment_id: PaymentId,
        old_status: PaymentStatus,
        new_status: PaymentStatus,
        timestamp: DateTime<Utc>,
    },

    // documents
    InvoiceGenerated {
        payment_id: PaymentId,
        invoice_id: DocumentId,
        total: Money,
        due_date: NaiveDate,
    },
    ReceiptIssued {
        payment_id: PaymentId,
        receipt_id: DocumentId,
        paid_amount: Money,
        payment_date: NaiveDate,
    },
    DocumentDispatched {
        document_id: DocumentId,
        channel: ReminderChannel,
        recipient: String,
        timestamp: DateTime<Utc>,
    },

    // reminders
    ReminderDispatched {
        payment_id: PaymentId,
        channel: ReminderChannel,
        delivered: bool,
        timestamp: DateTime<Utc>,
    },
    ReminderRecorded {
        payment_id: PaymentId,
        status: ReminderStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
