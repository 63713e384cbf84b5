use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{PaymentId, PaymentStatus, ReminderChannel};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BillingError {
    #[error("invalid meter reading: current {current} is below previous {previous}")]
    InvalidReading {
        previous: Decimal,
        current: Decimal,
    },

    #[error("payment {payment_id} is not paid: current status is {status:?}")]
    NotPaid {
        payment_id: PaymentId,
        status: PaymentStatus,
    },

    #[error("missing billing data for payment {payment_id}: cannot resolve {reference}")]
    MissingBillingData {
        payment_id: PaymentId,
        reference: String,
    },

    #[error("dispatch over {channel:?} failed: {reason}")]
    DispatchFailure {
        channel: ReminderChannel,
        reason: String,
    },

    #[error("invalid aggregation input: {message}")]
    AggregationInput {
        message: String,
    },

    #[error("invalid lease dates: end {end} is not after start {start}")]
    InvalidLeaseDates {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BillingError>;
