use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BillingError, Result};
use crate::decimal::Money;
use crate::events::{Event, EventStore};
use crate::status::resolve_status;
use crate::types::{DocumentId, LeaseId, PaymentId, PaymentMethod, PropertyId};

/// one water meter reading, owned by a single billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterMeterReading {
    pub payment_id: PaymentId,
    pub previous_reading: Decimal,
    pub current_reading: Decimal,
    pub reading_date: NaiveDate,
    pub previous_image: Option<String>,
    pub current_image: Option<String>,
}

impl WaterMeterReading {
    /// create a reading; usage can never be negative
    pub fn new(
        payment_id: PaymentId,
        previous_reading: Decimal,
        current_reading: Decimal,
        reading_date: NaiveDate,
    ) -> Result<Self> {
        if previous_reading.is_sign_negative()
            || current_reading.is_sign_negative()
            || current_reading < previous_reading
        {
            return Err(BillingError::InvalidReading {
                previous: previous_reading,
                current: current_reading,
            });
        }

        Ok(Self {
            payment_id,
            previous_reading,
            current_reading,
            reading_date,
            previous_image: None,
            current_image: None,
        })
    }

    /// metered usage for the period; zero is valid
    pub fn usage(&self) -> Decimal {
        self.current_reading - self.previous_reading
    }
}

/// the central record for one billing period of one tenancy
///
/// Created when the period opens and mutated as readings, payments and
/// documents arrive. Records are never deleted; closed periods feed the
/// financial reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPayment {
    pub id: PaymentId,
    pub lease_id: LeaseId,
    pub property_id: PropertyId,
    pub unit: String,
    pub rent_amount: Money,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub water_meter_reading: Option<WaterMeterReading>,
    pub invoice_id: Option<DocumentId>,
    pub receipt_id: Option<DocumentId>,
}

impl RentPayment {
    /// open a new billing period
    pub fn open(
        lease_id: LeaseId,
        property_id: PropertyId,
        unit: impl Into<String>,
        rent_amount: Money,
        due_date: NaiveDate,
        events: &mut EventStore,
    ) -> Result<Self> {
        if !rent_amount.is_positive() {
            return Err(BillingError::InvalidAmount {
                amount: rent_amount,
            });
        }

        let payment = Self {
            id: Uuid::new_v4(),
            lease_id,
            property_id,
            unit: unit.into(),
            rent_amount,
            due_date,
            payment_date: None,
            payment_method: None,
            water_meter_reading: None,
            invoice_id: None,
            receipt_id: None,
        };

        events.emit(Event::PeriodOpened {
            payment_id: payment.id,
            due_date,
            rent_amount,
        });

        Ok(payment)
    }

    /// record the period's meter reading
    ///
    /// Replaces any earlier reading for the same period.
    pub fn record_reading(
        &mut self,
        reading: WaterMeterReading,
        events: &mut EventStore,
    ) -> Result<()> {
        if reading.payment_id != self.id {
            return Err(BillingError::MissingBillingData {
                payment_id: self.id,
                reference: format!("reading belongs to payment {}", reading.payment_id),
            });
        }

        events.emit(Event::ReadingRecorded {
            payment_id: self.id,
            previous: reading.previous_reading,
            current: reading.current_reading,
            usage: reading.usage(),
            reading_date: reading.reading_date,
        });
        self.water_meter_reading = Some(reading);

        Ok(())
    }

    /// record a payment against the period
    ///
    /// Paid is terminal: recording a second payment for the period is
    /// rejected rather than overwriting the first.
    pub fn record_payment(
        &mut self,
        payment_date: NaiveDate,
        method: PaymentMethod,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<()> {
        if self.payment_date.is_some() {
            return Err(BillingError::InvalidConfiguration {
                message: format!("payment {} already settled", self.id),
            });
        }

        let old_status = resolve_status(self, time_provider);
        self.payment_date = Some(payment_date);
        self.payment_method = Some(method);
        let new_status = resolve_status(self, time_provider);

        events.emit(Event::PaymentRecorded {
            payment_id: self.id,
            amount: self.rent_amount,
            method,
            payment_date,
        });
        if old_status != new_status {
            events.emit(Event::StatusChanged {
                payment_id: self.id,
                old_status,
                new_status,
                timestamp: time_provider.now(),
            });
        }

        Ok(())
    }

    /// link the period's invoice; one active invoice per period
    pub fn attach_invoice(&mut self, invoice_id: DocumentId) {
        self.invoice_id = Some(invoice_id);
    }

    /// link the period's receipt
    pub fn attach_receipt(&mut self, receipt_id: DocumentId) {
        self.receipt_id = Some(receipt_id);
    }

    /// metered usage for the period, if a reading was recorded
    pub fn water_usage(&self) -> Option<Decimal> {
        self.water_meter_reading.as_ref().map(|r| r.usage())
    }
}
