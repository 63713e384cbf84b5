use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::LineItem;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::notify::{ChannelOutcome, Notifier};
use crate::types::{DocumentId, ReminderChannel};

/// the logical content of a rendered document
///
/// Layout is deterministic: header, party block, itemized table, total,
/// then the water note when a reading backs the period. Turning this into
/// bytes (PDF or otherwise) is the renderer collaborator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortableDocument {
    pub title: String,
    pub number: DocumentId,
    pub date: NaiveDate,
    pub tenant: String,
    pub property: String,
    pub unit: String,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub currency: String,
    pub water_note: Option<String>,
}

/// document-render seam: logical content in, bytes out
pub trait DocumentRenderer {
    fn render(&self, doc: &PortableDocument) -> Result<Vec<u8>>;
}

/// render a document and hand it to the notification collaborator
///
/// Failures come back as a typed outcome instead of an error so a batch
/// send can keep going past one bad record.
pub fn dispatch_document(
    renderer: &dyn DocumentRenderer,
    notifier: &dyn Notifier,
    doc: &PortableDocument,
    channel: ReminderChannel,
    recipient: &str,
    time_provider: &hourglass_rs::SafeTimeProvider,
    events: &mut EventStore,
) -> ChannelOutcome {
    let bytes = match renderer.render(doc) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(document = %doc.number, %err, "document render failed");
            return ChannelOutcome::failed(channel, err.to_string());
        }
    };

    match notifier.send_document(channel, recipient, &doc.title, &bytes) {
        Ok(()) => {
            events.emit(Event::DocumentDispatched {
                document_id: doc.number,
                channel,
                recipient: recipient.to_string(),
                timestamp: time_provider.now(),
            });
            ChannelOutcome::delivered(channel)
        }
        Err(err) => {
            tracing::warn!(document = %doc.number, ?channel, %err, "document dispatch failed");
            ChannelOutcome::failed(channel, err.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{RecordingNotifier, TextRenderer};
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use uuid::Uuid;

    fn sample_doc() -> PortableDocument {
        PortableDocument {
            title: "Invoice".to_string(),
            number: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            tenant: "John Doe".to_string(),
            property: "Sunset Apartments".to_string(),
            unit: "101".to_string(),
            items: vec![LineItem::new("Rent", Money::from_major(50_000))],
            total: Money::from_major(50_000),
            currency: "KES".to_string(),
            water_note: Some("Water: 100 -> 150 (50 units)".to_string()),
        }
    }

    #[test]
    fn test_text_render_layout_is_deterministic() {
        let doc = sample_doc();
        let bytes = TextRenderer.render(&doc).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let expected = format!(
            "Invoice\nNo: {}\nDate: 2024-05-01\nTenant: John Doe\nProperty: Sunset Apartments, 101\nRent: KES 50000\nTotal: KES 50000\nWater: 100 -> 150 (50 units)",
            doc.number
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_dispatch_failure_returns_outcome_not_error() {
        let doc = sample_doc();
        let notifier = RecordingNotifier {
            fail_channels: vec![ReminderChannel::Email],
            ..Default::default()
        };
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        ));
        let mut events = EventStore::new();

        let outcome = dispatch_document(
            &TextRenderer,
            &notifier,
            &doc,
            ReminderChannel::Email,
            "john@example.com",
            &time,
            &mut events,
        );

        assert!(!outcome.delivered);
        assert!(outcome.error.is_some());
        assert!(events.events().is_empty());
    }

    #[test]
    fn test_dispatch_success_emits_event() {
        let doc = sample_doc();
        let notifier = RecordingNotifier::default();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        ));
        let mut events = EventStore::new();

        let outcome = dispatch_document(
            &TextRenderer,
            &notifier,
            &doc,
            ReminderChannel::Email,
            "john@example.com",
            &time,
            &mut events,
        );

        assert!(outcome.delivered);
        assert_eq!(notifier.sent.borrow().len(), 1);
        assert!(matches!(
            events.events()[0],
            Event::DocumentDispatched { .. }
        ));
    }
}
