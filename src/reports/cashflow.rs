use serde::{Deserialize, Serialize};

use crate::billing::compute_charges;
use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::documents::Invoice;
use crate::errors::Result;
use crate::payment::RentPayment;
use crate::reports::{MonthWindow, BUCKETS};
use crate::store::ExpenseLedger;

/// monthly inflow vs outflow over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// settled totals, bucketed by payment date
    pub inflow: [Money; BUCKETS],
    /// ledger expenses, bucketed by entry date
    pub outflow: [Money; BUCKETS],
}

impl CashFlowReport {
    /// build the report over settled payments and the expense ledger
    pub fn build(
        window: &MonthWindow,
        payments: &[RentPayment],
        ledger: &dyn ExpenseLedger,
        config: &BillingConfig,
    ) -> Result<Self> {
        let mut inflow = [Money::ZERO; BUCKETS];
        for payment in payments {
            let Some(paid_on) = payment.payment_date else {
                continue;
            };
            let Some(index) = window.bucket_index(paid_on) else {
                continue;
            };
            inflow[index] += compute_charges(payment, config)?.total_due();
        }

        let mut outflow = [Money::ZERO; BUCKETS];
        for entry in ledger.entries_between(window.start_date(), window.end_date()) {
            if let Some(index) = window.bucket_index(entry.date) {
                outflow[index] += entry.amount;
            }
        }

        Ok(Self { inflow, outflow })
    }

    /// net position per bucket
    pub fn net(&self) -> [Money; BUCKETS] {
        let mut net = [Money::ZERO; BUCKETS];
        for i in 0..BUCKETS {
            net[i] = self.inflow[i] - self.outflow[i];
        }
        net
    }
}

/// stacked monthly invoice composition: rent, water, flat fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceComponentSeries {
    pub rent: [Money; BUCKETS],
    pub water: [Money; BUCKETS],
    pub fees: [Money; BUCKETS],
}

/// bucket generated invoices by their period due date
pub fn invoice_components(window: &MonthWindow, invoices: &[Invoice]) -> InvoiceComponentSeries {
    let mut series = InvoiceComponentSeries {
        rent: [Money::ZERO; BUCKETS],
        water: [Money::ZERO; BUCKETS],
        fees: [Money::ZERO; BUCKETS],
    };

    for invoice in invoices {
        let Some(index) = window.bucket_index(invoice.due_date) else {
            continue;
        };
        series.rent[index] += invoice.charges.rent;
        series.water[index] += invoice.charges.water;
        series.fees[index] += invoice.charges.fixed_fees.iter().map(|f| f.amount).sum::<Money>();
    }

    series
}
