use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::{AbortFlag, BatchReport};
use crate::billing::compute_charges;
use crate::config::BillingConfig;
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::notify::{ChannelOutcome, DispatchOutcome, Notifier};
use crate::payment::RentPayment;
use crate::status::resolve_status;
use crate::store::PartyDirectory;
use crate::types::{
    DocumentId, PaymentId, PaymentStatus, ReminderChannel, ReminderMethod, ReminderStatus,
};

/// how one reminder should be sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOptions {
    pub method: ReminderMethod,
    /// replaces the default template wholesale when set
    pub message: Option<String>,
}

impl Default for ReminderOptions {
    fn default() -> Self {
        Self {
            method: ReminderMethod::Both,
            message: None,
        }
    }
}

/// one recorded reminder send
///
/// Re-sends are expected and never deduplicated; every send becomes its
/// own record for audit and statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: DocumentId,
    pub payment_id: PaymentId,
    pub method: ReminderMethod,
    pub message: String,
    pub outcomes: Vec<ChannelOutcome>,
    pub status: ReminderStatus,
    pub sent_at: DateTime<Utc>,
}

impl Reminder {
    /// overall fan-out result, folded from the per-channel outcomes
    pub fn dispatch_outcome(&self) -> DispatchOutcome {
        DispatchOutcome::from_outcomes(&self.outcomes)
    }
}

/// per-record result of a batch run
#[derive(Debug)]
pub enum RecordOutcome {
    Dispatched(Reminder),
    Failed {
        payment_id: PaymentId,
        error: BillingError,
    },
}

/// composes and sends payment reminders through the notification seam
pub struct ReminderDispatcher<'a> {
    config: &'a BillingConfig,
    directory: &'a dyn PartyDirectory,
    notifier: &'a dyn Notifier,
}

impl<'a> ReminderDispatcher<'a> {
    pub fn new(
        config: &'a BillingConfig,
        directory: &'a dyn PartyDirectory,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            directory,
            notifier,
        }
    }

    /// payments worth reminding as of now: not paid, and due within the
    /// configured window (overdue periods always qualify)
    pub fn select_candidates<'p>(
        &self,
        payments: &'p [RentPayment],
        time_provider: &SafeTimeProvider,
    ) -> Vec<&'p RentPayment> {
        let today = time_provider.now().date_naive();
        payments
            .iter()
            .filter(|p| resolve_status(p, time_provider) != PaymentStatus::Paid)
            .filter(|p| (p.due_date - today).num_days() <= self.config.reminder_window_days)
            .collect()
    }

    /// default message template: tenant, amount, property, due date
    fn compose_message(
        &self,
        payment: &RentPayment,
        tenant_name: &str,
        property_name: &str,
    ) -> Result<String> {
        let total = compute_charges(payment, self.config)?.total_due();
        Ok(format!(
            "Dear {tenant_name},\n\n\
             This is a friendly reminder that your rent payment of {currency} {total} \
             for {property_name} is due on {due}. Please ensure timely payment to \
             avoid any late fees.\n\n\
             If you have already made the payment, please disregard this message.\n\n\
             Thank you for your cooperation.\n\n\
             Best regards,\nKeja Plus Property Management",
            currency = self.config.currency,
            due = payment.due_date,
        ))
    }

    /// send one reminder
    ///
    /// Every channel of the requested method is attempted even when an
    /// earlier one fails; each attempt is recorded as its own outcome. A
    /// payment that already reads Paid produces a Resolved record with no
    /// sends.
    pub fn send_reminder(
        &self,
        payment: &RentPayment,
        options: &ReminderOptions,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Reminder> {
        let now = time_provider.now();

        if resolve_status(payment, time_provider) == PaymentStatus::Paid {
            let reminder = Reminder {
                id: Uuid::new_v4(),
                payment_id: payment.id,
                method: options.method,
                message: String::new(),
                outcomes: Vec::new(),
                status: ReminderStatus::Resolved,
                sent_at: now,
            };
            events.emit(Event::ReminderRecorded {
                payment_id: payment.id,
                status: ReminderStatus::Resolved,
                timestamp: now,
            });
            return Ok(reminder);
        }

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

        let message = match &options.message {
            Some(custom) => custom.clone(),
            None => self.compose_message(payment, &lease.tenant.name, &property.name)?,
        };

        let mut outcomes = Vec::new();
        for &channel in options.method.channels() {
            let recipient = match channel {
                ReminderChannel::Email => lease.tenant.email.as_str(),
                ReminderChannel::Sms => lease.tenant.phone.as_str(),
            };
            let outcome = match self.notifier.send(channel, recipient, &message) {
                Ok(()) => ChannelOutcome::delivered(channel),
                Err(err) => {
                    tracing::warn!(payment = %payment.id, ?channel, %err, "reminder send failed");
                    ChannelOutcome::failed(channel, err.to_string())
                }
            };
            events.emit(Event::ReminderDispatched {
                payment_id: payment.id,
                channel,
                delivered: outcome.delivered,
                timestamp: now,
            });
            outcomes.push(outcome);
        }

        let status = match DispatchOutcome::from_outcomes(&outcomes) {
            DispatchOutcome::Sent => ReminderStatus::Sent,
            DispatchOutcome::PartialFailure | DispatchOutcome::Failed => ReminderStatus::Pending,
        };
        events.emit(Event::ReminderRecorded {
            payment_id: payment.id,
            status,
            timestamp: now,
        });

        Ok(Reminder {
            id: Uuid::new_v4(),
            payment_id: payment.id,
            method: options.method,
            message,
            outcomes,
            status,
            sent_at: now,
        })
    }

    /// run the automatic reminder batch over the given payments
    ///
    /// Records are processed one at a time; a failure on one record never
    /// stops the rest. The abort flag is honored between records, and the
    /// report says how many were completed before the abort.
    pub fn run_batch(
        &self,
        payments: &[RentPayment],
        abort: &AbortFlag,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> (Vec<RecordOutcome>, BatchReport) {
        let candidates = self.select_candidates(payments, time_provider);
        let mut results = Vec::with_capacity(candidates.len());
        let mut report = BatchReport::default();

        for (index, payment) in candidates.iter().enumerate() {
            if abort.is_aborted() {
                report.aborted = true;
                report.remaining = (candidates.len() - index) as u32;
                break;
            }

            match self.send_reminder(payment, &ReminderOptions::default(), time_provider, events) {
                Ok(reminder) => {
                    match reminder.dispatch_outcome() {
                        DispatchOutcome::Sent => report.delivered += 1,
                        DispatchOutcome::PartialFailure => report.partial_failures += 1,
                        DispatchOutcome::Failed => report.failures += 1,
                    }
                    results.push(RecordOutcome::Dispatched(reminder));
                }
                Err(error) => {
                    tracing::warn!(payment = %payment.id, %error, "reminder record failed");
                    report.failures += 1;
                    results.push(RecordOutcome::Failed {
                        payment_id: payment.id,
                        error,
                    });
                }
            }
            report.completed += 1;
        }

        tracing::info!(
            completed = report.completed,
            delivered = report.delivered,
            partial = report.partial_failures,
            failed = report.failures,
            aborted = report.aborted,
            "reminder batch finished"
        );

        (results, report)
    }
}
