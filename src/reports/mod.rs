pub mod cashflow;
pub mod expenses;
pub mod occupancy;
pub mod profitability;
pub mod trends;

use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::documents::{Invoice, Receipt};
use crate::errors::{BillingError, Result};
use crate::payment::RentPayment;
use crate::reminders::Reminder;
use crate::store::{ExpenseLedger, OccupancySource};

pub use cashflow::{invoice_components, CashFlowReport, InvoiceComponentSeries};
pub use expenses::{ExpenseBreakdown, ExpenseShare};
pub use occupancy::OccupancyImpact;
pub use profitability::ProfitabilityMetrics;
pub use trends::{DocumentSummary, DocumentTrends, PaymentTrends};

/// the twelve monthly report buckets
pub const BUCKETS: usize = 12;

/// a fixed window of twelve calendar months
///
/// Index 0 is the oldest month, index 11 the newest. Dates outside the
/// window get no bucket; they are excluded from reports, never clamped
/// into the edge buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    end_year: i32,
    end_month: u32,
}

impl MonthWindow {
    /// the trailing twelve months ending at the current month
    pub fn trailing(time_provider: &SafeTimeProvider) -> Self {
        let today = time_provider.now().date_naive();
        Self {
            end_year: today.year(),
            end_month: today.month(),
        }
    }

    /// twelve months ending at the given calendar month
    pub fn ending(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BillingError::AggregationInput {
                message: format!("month out of range: {month}"),
            });
        }
        Ok(Self {
            end_year: year,
            end_month: month,
        })
    }

    /// twelve months ending at the month of `end`; the range must run
    /// forwards
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(BillingError::AggregationInput {
                message: format!("date range runs backwards: {start} to {end}"),
            });
        }
        Self::ending(end.year(), end.month())
    }

    /// bucket for a date, or None when it falls outside the window
    pub fn bucket_index(&self, date: NaiveDate) -> Option<usize> {
        let months_back = (self.end_year as i64 * 12 + self.end_month as i64 - 1)
            - (date.year() as i64 * 12 + date.month() as i64 - 1);
        if (0..BUCKETS as i64).contains(&months_back) {
            Some(BUCKETS - 1 - months_back as usize)
        } else {
            None
        }
    }

    /// calendar (year, month) of one bucket
    pub fn month_of(&self, index: usize) -> (i32, u32) {
        let months = self.end_year as i64 * 12 + self.end_month as i64 - 1
            - (BUCKETS as i64 - 1 - index as i64);
        ((months / 12) as i32, (months % 12 + 1) as u32)
    }

    /// first day of the oldest bucket
    pub fn start_date(&self) -> NaiveDate {
        let (year, month) = self.month_of(0);
        NaiveDate::from_ymd_opt(year, month, 1).expect("bucket month is valid")
    }

    /// last day of the newest bucket
    pub fn end_date(&self) -> NaiveDate {
        let (year, month) = self.month_of(BUCKETS - 1);
        let first_next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        first_next.expect("bucket month is valid") - chrono::Duration::days(1)
    }
}

/// everything one report run consumes
pub struct ReportInputs<'a> {
    pub payments: &'a [RentPayment],
    pub invoices: &'a [Invoice],
    pub receipts: &'a [Receipt],
    pub reminders: &'a [Reminder],
    pub expense_ledger: &'a dyn ExpenseLedger,
    pub occupancy: &'a dyn OccupancySource,
    /// capital base for the roi figure (acquisition costs)
    pub investment: Money,
}

/// the full financial report, one view per tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub window: MonthWindow,
    pub cash_flow: CashFlowReport,
    pub invoice_components: InvoiceComponentSeries,
    pub expense_breakdown: ExpenseBreakdown,
    pub occupancy_impact: OccupancyImpact,
    pub payment_trends: PaymentTrends,
    pub document_trends: DocumentTrends,
    pub profitability: ProfitabilityMetrics,
}

impl FinancialReport {
    /// build every view over one window
    ///
    /// An error in any view fails this report request and nothing else.
    pub fn build(
        window: MonthWindow,
        inputs: &ReportInputs<'_>,
        config: &BillingConfig,
    ) -> Result<Self> {
        let cash_flow =
            CashFlowReport::build(&window, inputs.payments, inputs.expense_ledger, config)?;
        let expense_breakdown = ExpenseBreakdown::from_ledger(&window, inputs.expense_ledger)?;
        let occupancy_impact = OccupancyImpact::build(
            &window,
            &cash_flow.inflow,
            inputs.occupancy,
            config.occupancy_floor,
        )?;
        let payment_trends = PaymentTrends::build(&window, inputs.payments, config)?;
        let document_trends =
            DocumentTrends::build(&window, inputs.invoices, inputs.receipts, inputs.reminders);
        let total_revenue = cash_flow.inflow.iter().copied().sum();
        let total_expenses = cash_flow.outflow.iter().copied().sum();
        let profitability = ProfitabilityMetrics::compute(
            total_revenue,
            total_expenses,
            total_expenses,
            inputs.investment,
        );

        Ok(Self {
            window,
            invoice_components: invoice_components(&window, inputs.invoices),
            cash_flow,
            expense_breakdown,
            occupancy_impact,
            payment_trends,
            document_trends,
            profitability,
        })
    }
}
