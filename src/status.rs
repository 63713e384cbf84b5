//! Lazy status derivation.
//!
//! Nothing here is persisted: payment and lease status are recomputed from
//! the stored dates on every read, so a record can never carry a stale flag.

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::payment::RentPayment;
use crate::property::Lease;
use crate::types::{LeaseStatus, PaymentStatus};

/// resolve a payment's lifecycle status as of now
///
/// A recorded payment date is authoritative: it wins over any due-date
/// comparison, and Paid is terminal for the period.
pub fn resolve_status(payment: &RentPayment, time_provider: &SafeTimeProvider) -> PaymentStatus {
    resolve_status_on(payment, time_provider.now().date_naive())
}

/// resolve a payment's lifecycle status as of the given day
pub fn resolve_status_on(payment: &RentPayment, today: NaiveDate) -> PaymentStatus {
    if payment.payment_date.is_some() {
        PaymentStatus::Paid
    } else if today > payment.due_date {
        PaymentStatus::Overdue
    } else {
        PaymentStatus::Pending
    }
}

/// whether a settled payment arrived after its due date
///
/// A payment made exactly on the due date is on-time.
pub fn is_late(payment: &RentPayment) -> bool {
    matches!(payment.payment_date, Some(paid) if paid > payment.due_date)
}

/// days the payment arrived past due, if it was late
pub fn late_days(payment: &RentPayment) -> Option<i64> {
    payment
        .payment_date
        .filter(|paid| *paid > payment.due_date)
        .map(|paid| (paid - payment.due_date).num_days())
}

/// resolve a lease's status as of now
pub fn lease_status(
    lease: &Lease,
    time_provider: &SafeTimeProvider,
    expiry_horizon_days: i64,
) -> LeaseStatus {
    lease_status_on(lease, time_provider.now().date_naive(), expiry_horizon_days)
}

/// resolve a lease's status as of the given day
pub fn lease_status_on(lease: &Lease, today: NaiveDate, expiry_horizon_days: i64) -> LeaseStatus {
    let remaining = lease.days_until_expiry(today);
    if remaining < 0 {
        LeaseStatus::Expired
    } else if remaining <= expiry_horizon_days {
        LeaseStatus::Expiring
    } else {
        LeaseStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use uuid::Uuid;

    use crate::decimal::Money;
    use crate::events::EventStore;
    use crate::property::TenantContact;
    use crate::types::PaymentMethod;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn frozen(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(),
        ))
    }

    fn payment_due(due: NaiveDate) -> RentPayment {
        let mut events = EventStore::new();
        RentPayment::open(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "101",
            Money::from_major(18_000),
            due,
            &mut events,
        )
        .unwrap()
    }

    fn pay(payment: &mut RentPayment, on: NaiveDate, time: &SafeTimeProvider) {
        let mut events = EventStore::new();
        payment
            .record_payment(on, PaymentMethod::Mpesa, time, &mut events)
            .unwrap();
    }

    #[test]
    fn test_paid_before_due_is_on_time() {
        let time = frozen(2024, 6, 1);
        let mut payment = payment_due(date(2024, 5, 1));
        pay(&mut payment, date(2024, 4, 28), &time);

        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Paid);
        assert!(!is_late(&payment));
        assert_eq!(late_days(&payment), None);
    }

    #[test]
    fn test_paid_after_due_is_late_but_still_paid() {
        let time = frozen(2024, 6, 1);
        let mut payment = payment_due(date(2024, 5, 1));
        pay(&mut payment, date(2024, 5, 10), &time);

        // payment date presence wins over the due-date comparison
        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Paid);
        assert!(is_late(&payment));
        assert_eq!(late_days(&payment), Some(9));
    }

    #[test]
    fn test_payment_on_due_date_is_on_time() {
        let time = frozen(2024, 6, 1);
        let mut payment = payment_due(date(2024, 5, 1));
        pay(&mut payment, date(2024, 5, 1), &time);

        assert!(!is_late(&payment));
    }

    #[test]
    fn test_unpaid_past_due_reads_overdue() {
        let time = frozen(2024, 6, 1);
        let payment = payment_due(date(2024, 4, 1));
        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Overdue);
    }

    #[test]
    fn test_unpaid_on_due_date_still_pending() {
        let time = frozen(2024, 5, 1);
        let payment = payment_due(date(2024, 5, 1));
        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Pending);
    }

    #[test]
    fn test_status_follows_advancing_clock() {
        let time = frozen(2024, 4, 30);
        let control = time.test_control().unwrap();
        let payment = payment_due(date(2024, 5, 1));

        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Pending);
        control.advance(Duration::days(2));
        assert_eq!(resolve_status(&payment, &time), PaymentStatus::Overdue);
    }

    fn lease_ending(end: NaiveDate) -> Lease {
        Lease::new(
            Uuid::new_v4(),
            TenantContact {
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                phone: "0700000002".to_string(),
                id_number: "87654321".to_string(),
            },
            "5",
            end - Duration::days(365),
            end,
            Money::from_major(25_000),
            Money::from_major(50_000),
            1,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_lease_status_over_expiry_horizon() {
        let lease = lease_ending(date(2024, 7, 1));

        assert_eq!(
            lease_status_on(&lease, date(2024, 5, 1), 30),
            LeaseStatus::Active
        );
        // exactly 30 days out counts as expiring
        assert_eq!(
            lease_status_on(&lease, date(2024, 6, 1), 30),
            LeaseStatus::Expiring
        );
        assert_eq!(
            lease_status_on(&lease, date(2024, 7, 1), 30),
            LeaseStatus::Expiring
        );
        assert_eq!(
            lease_status_on(&lease, date(2024, 7, 2), 30),
            LeaseStatus::Expired
        );
    }
}
