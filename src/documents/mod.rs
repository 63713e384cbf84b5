pub mod invoice;
pub mod receipt;
pub mod render;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hourglass_rs::SafeTimeProvider;

use crate::billing::compute_charges;
use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::payment::RentPayment;
use crate::status::resolve_status;
use crate::store::PartyDirectory;
use crate::types::PaymentStatus;

pub use invoice::{invoice_status_for, Invoice};
pub use receipt::Receipt;
pub use render::{dispatch_document, DocumentRenderer, PortableDocument};

/// water readings carried onto a generated document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterUsage {
    pub previous_reading: Decimal,
    pub current_reading: Decimal,
}

impl WaterUsage {
    pub fn usage(&self) -> Decimal {
        self.current_reading - self.previous_reading
    }

    /// trailing note rendered below the itemized table
    pub fn note(&self) -> String {
        format!(
            "Water meter: previous {}, current {} ({} units)",
            self.previous_reading,
            self.current_reading,
            self.usage()
        )
    }
}

/// generates invoices and receipts from payment snapshots
///
/// Party references are resolved through the directory seam; a reference
/// that does not resolve fails the generation rather than producing a
/// document with holes in it.
pub struct DocumentGenerator<'a> {
    config: &'a BillingConfig,
    directory: &'a dyn PartyDirectory,
}

impl<'a> DocumentGenerator<'a> {
    pub fn new(config: &'a BillingConfig, directory: &'a dyn PartyDirectory) -> Self {
        Self { config, directory }
    }

    fn resolve_parties(&self, payment: &RentPayment) -> Result<(String, String)> {
        let lease = self.directory.lease(payment.lease_id).ok_or_else(|| {
            BillingError::MissingBillingData {
                payment_id: payment.id,
                reference: format!("lease {}", payment.lease_id),
            }
        })?;
        let property = self.directory.property(payment.property_id).ok_or_else(|| {
            BillingError::MissingBillingData {
                payment_id: payment.id,
                reference: format!("property {}", payment.property_id),
            }
        })?;

        Ok((lease.tenant.name, property.name))
    }

    /// generate the period's invoice
    ///
    /// A period without a meter reading is invoiced with zero water.
    pub fn generate_invoice(
        &self,
        payment: &RentPayment,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Invoice> {
        let (tenant_name, property_name) = self.resolve_parties(payment)?;
        let charges = compute_charges(payment, self.config)?;
        let total = charges.total_due();

        let invoice = Invoice {
            id: Uuid::new_v4(),
            payment_id: payment.id,
            tenant_name,
            property_name,
            unit: payment.unit.clone(),
            total,
            due_date: payment.due_date,
            issued_on: time_provider.now().date_naive(),
            status: invoice_status_for(resolve_status(payment, time_provider)),
            water_usage: payment.water_meter_reading.as_ref().map(|r| WaterUsage {
                previous_reading: r.previous_reading,
                current_reading: r.current_reading,
            }),
            charges,
        };

        events.emit(Event::InvoiceGenerated {
            payment_id: payment.id,
            invoice_id: invoice.id,
            total,
            due_date: invoice.due_date,
        });

        Ok(invoice)
    }

    /// generate the period's receipt
    ///
    /// Only a Paid period gets a receipt, and only after its invoice
    /// exists; the pending balance on a receipt is always zero.
    pub fn generate_receipt(
        &self,
        payment: &RentPayment,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Receipt> {
        let status = resolve_status(payment, time_provider);
        if status != PaymentStatus::Paid {
            return Err(BillingError::NotPaid {
                payment_id: payment.id,
                status,
            });
        }
        if payment.invoice_id.is_none() {
            return Err(BillingError::MissingBillingData {
                payment_id: payment.id,
                reference: "invoice for the period".to_string(),
            });
        }
        let (payment_date, payment_method) = match (payment.payment_date, payment.payment_method) {
            (Some(date), Some(method)) => (date, method),
            _ => {
                return Err(BillingError::NotPaid {
                    payment_id: payment.id,
                    status,
                })
            }
        };

        let (tenant_name, property_name) = self.resolve_parties(payment)?;
        let paid_amount = compute_charges(payment, self.config)?.total_due();

        let receipt = Receipt {
            id: Uuid::new_v4(),
            payment_id: payment.id,
            tenant_name,
            property_name,
            unit: payment.unit.clone(),
            paid_amount,
            pending_balance: Money::ZERO,
            payment_date,
            payment_method,
            water_usage: payment.water_meter_reading.as_ref().map(|r| WaterUsage {
                previous_reading: r.previous_reading,
                current_reading: r.current_reading,
            }),
        };

        events.emit(Event::ReceiptIssued {
            payment_id: payment.id,
            receipt_id: receipt.id,
            paid_amount,
            payment_date,
        });

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    use crate::payment::WaterMeterReading;
    use crate::property::{Lease, Property, TenantContact};
    use crate::store::InMemoryDirectory;
    use crate::types::{InvoiceStatus, Manager, PaymentMethod, PropertyType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn frozen(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
        ))
    }

    struct Fixture {
        config: BillingConfig,
        directory: InMemoryDirectory,
        payment: RentPayment,
        events: EventStore,
    }

    fn fixture() -> Fixture {
        let config = BillingConfig::standard(Money::from_major(100), Money::from_major(300));
        let property = Property::new(
            "Sunset Apartments",
            "Nairobi",
            PropertyType::Apartment,
            8,
            Money::from_major(50_000),
            date(2020, 1, 1),
            vec![Manager {
                name: "Grace Mwangi".to_string(),
                phone: "0712345678".to_string(),
            }],
        )
        .unwrap();
        let lease = Lease::new(
            property.id,
            TenantContact {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "0700000001".to_string(),
                id_number: "12345678".to_string(),
            },
            "101",
            date(2024, 1, 1),
            date(2024, 12, 31),
            Money::from_major(50_000),
            Money::from_major(100_000),
            2,
            false,
        )
        .unwrap();

        let mut events = EventStore::new();
        let mut payment = RentPayment::open(
            lease.id,
            property.id,
            "101",
            Money::from_major(50_000),
            date(2024, 5, 1),
            &mut events,
        )
        .unwrap();
        let reading =
            WaterMeterReading::new(payment.id, dec!(100), dec!(150), date(2024, 4, 25)).unwrap();
        payment.record_reading(reading, &mut events).unwrap();
        events.clear();

        Fixture {
            config,
            directory: InMemoryDirectory {
                leases: vec![lease],
                properties: vec![property],
            },
            payment,
            events,
        }
    }

    #[test]
    fn test_invoice_itemizes_rent_water_and_fees() {
        let mut fx = fixture();
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 4, 26);

        let invoice = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap();

        assert_eq!(invoice.tenant_name, "John Doe");
        assert_eq!(invoice.property_name, "Sunset Apartments");
        assert_eq!(invoice.charges.rent, Money::from_major(50_000));
        assert_eq!(invoice.charges.water, Money::from_major(5_000));
        assert_eq!(invoice.total, Money::from_major(55_300));
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert_eq!(invoice.water_usage.unwrap().usage(), dec!(50));
        assert!(matches!(
            fx.events.events()[0],
            Event::InvoiceGenerated { .. }
        ));
    }

    #[test]
    fn test_invoice_without_reading_bills_zero_water() {
        let mut fx = fixture();
        fx.payment.water_meter_reading = None;
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 4, 26);

        let invoice = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap();
        assert_eq!(invoice.charges.water, Money::ZERO);
        assert!(invoice.water_usage.is_none());
        assert_eq!(invoice.total, Money::from_major(50_300));
    }

    #[test]
    fn test_invoice_for_overdue_period_reads_overdue() {
        let mut fx = fixture();
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 6, 15);

        let invoice = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_unresolvable_lease_fails_generation() {
        let mut fx = fixture();
        fx.directory.leases.clear();
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 4, 26);

        let err = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap_err();
        assert!(matches!(err, BillingError::MissingBillingData { .. }));
    }

    #[test]
    fn test_receipt_requires_paid_status() {
        let mut fx = fixture();
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 4, 26);

        let err = generator
            .generate_receipt(&fx.payment, &time, &mut fx.events)
            .unwrap_err();
        assert_eq!(
            err,
            BillingError::NotPaid {
                payment_id: fx.payment.id,
                status: PaymentStatus::Pending,
            }
        );
    }

    #[test]
    fn test_receipt_requires_invoice_first() {
        let mut fx = fixture();
        let time = frozen(2024, 4, 28);
        fx.payment
            .record_payment(date(2024, 4, 28), PaymentMethod::Mpesa, &time, &mut fx.events)
            .unwrap();

        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let err = generator
            .generate_receipt(&fx.payment, &time, &mut fx.events)
            .unwrap_err();
        assert!(matches!(err, BillingError::MissingBillingData { .. }));
    }

    #[test]
    fn test_receipt_snapshot_for_paid_period() {
        let mut fx = fixture();
        let time = frozen(2024, 4, 28);
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);

        let invoice = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap();
        fx.payment.attach_invoice(invoice.id);
        fx.payment
            .record_payment(date(2024, 4, 28), PaymentMethod::BankTransfer, &time, &mut fx.events)
            .unwrap();
        fx.events.clear();

        let receipt = generator
            .generate_receipt(&fx.payment, &time, &mut fx.events)
            .unwrap();

        assert_eq!(receipt.paid_amount, Money::from_major(55_300));
        assert_eq!(receipt.pending_balance, Money::ZERO);
        assert_eq!(receipt.payment_date, date(2024, 4, 28));
        assert_eq!(receipt.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(receipt.water_usage.unwrap().usage(), dec!(50));
        assert!(matches!(fx.events.events()[0], Event::ReceiptIssued { .. }));
    }

    #[test]
    fn test_portable_invoice_layout_fields() {
        let mut fx = fixture();
        let generator = DocumentGenerator::new(&fx.config, &fx.directory);
        let time = frozen(2024, 4, 26);

        let invoice = generator
            .generate_invoice(&fx.payment, &time, &mut fx.events)
            .unwrap();
        let doc = invoice.to_portable(&fx.config.currency);

        assert_eq!(doc.title, "Invoice");
        assert_eq!(doc.date, date(2024, 4, 26));
        let labels: Vec<&str> = doc.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Rent", "Water", "Garbage"]);
        assert_eq!(doc.total, Money::from_major(55_300));
        assert!(doc.water_note.unwrap().contains("50 units"));
    }
}
