use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::compute_charges;
use crate::config::BillingConfig;
use crate::decimal::{Money, Rate};
use crate::documents::{Invoice, Receipt};
use crate::errors::Result;
use crate::payment::RentPayment;
use crate::reminders::Reminder;
use crate::reports::{MonthWindow, BUCKETS};
use crate::status::{is_late, late_days};

/// on-time vs late settlement behavior over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTrends {
    pub on_time: [u32; BUCKETS],
    pub late: [u32; BUCKETS],
    /// mean days past due across settled periods (on-time counts as zero)
    pub average_payment_delay_days: Decimal,
    /// collected over expected, as a fraction
    pub collection_rate: Rate,
}

impl PaymentTrends {
    pub fn build(
        window: &MonthWindow,
        payments: &[RentPayment],
        config: &BillingConfig,
    ) -> Result<Self> {
        let mut on_time = [0u32; BUCKETS];
        let mut late = [0u32; BUCKETS];
        let mut settled = 0u32;
        let mut delay_total = 0i64;
        let mut expected = Money::ZERO;
        let mut collected = Money::ZERO;

        for payment in payments {
            // expectation is tied to the period's due month
            if window.bucket_index(payment.due_date).is_some() {
                let total = compute_charges(payment, config)?.total_due();
                expected += total;
                if payment.payment_date.is_some() {
                    collected += total;
                }
            }

            let Some(paid_on) = payment.payment_date else {
                continue;
            };
            let Some(index) = window.bucket_index(paid_on) else {
                continue;
            };

            settled += 1;
            if is_late(payment) {
                late[index] += 1;
                delay_total += late_days(payment).unwrap_or(0);
            } else {
                on_time[index] += 1;
            }
        }

        let average_payment_delay_days = if settled == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(delay_total) / Decimal::from(settled)
        };
        let collection_rate = if expected.is_zero() {
            Rate::ZERO
        } else {
            Rate::from_fraction(collected.as_decimal() / expected.as_decimal())
        };

        Ok(Self {
            on_time,
            late,
            average_payment_delay_days,
            collection_rate,
        })
    }
}

/// total generated documents per type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub invoices: u32,
    pub receipts: u32,
    pub reminders: u32,
}

/// monthly document counts per type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTrends {
    pub invoices: [u32; BUCKETS],
    pub receipts: [u32; BUCKETS],
    pub reminders: [u32; BUCKETS],
}

impl DocumentTrends {
    /// bucket documents by issue, payment and send dates respectively
    pub fn build(
        window: &MonthWindow,
        invoices: &[Invoice],
        receipts: &[Receipt],
        reminders: &[Reminder],
    ) -> Self {
        let mut trends = Self {
            invoices: [0; BUCKETS],
            receipts: [0; BUCKETS],
            reminders: [0; BUCKETS],
        };

        for invoice in invoices {
            if let Some(i) = window.bucket_index(invoice.issued_on) {
                trends.invoices[i] += 1;
            }
        }
        for receipt in receipts {
            if let Some(i) = window.bucket_index(receipt.payment_date) {
                trends.receipts[i] += 1;
            }
        }
        for reminder in reminders {
            if let Some(i) = window.bucket_index(reminder.sent_at.date_naive()) {
                trends.reminders[i] += 1;
            }
        }

        trends
    }

    pub fn totals(&self) -> DocumentSummary {
        DocumentSummary {
            invoices: self.invoices.iter().sum(),
            receipts: self.receipts.iter().sum(),
            reminders: self.reminders.iter().sum(),
        }
    }
}
