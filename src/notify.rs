use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::ReminderChannel;

/// outbound notification seam
///
/// Transport, retries and timeouts live behind this trait; a timeout is
/// indistinguishable from any other channel failure on this side.
pub trait Notifier {
    /// send a plain message over one channel
    fn send(&self, channel: ReminderChannel, recipient: &str, message: &str) -> Result<()>;

    /// send a rendered document over one channel
    fn send_document(
        &self,
        channel: ReminderChannel,
        recipient: &str,
        subject: &str,
        body: &[u8],
    ) -> Result<()>;
}

/// what happened on one channel of one send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    pub channel: ReminderChannel,
    pub delivered: bool,
    pub error: Option<String>,
}

impl ChannelOutcome {
    pub fn delivered(channel: ReminderChannel) -> Self {
        Self {
            channel,
            delivered: true,
            error: None,
        }
    }

    pub fn failed(channel: ReminderChannel, error: impl Into<String>) -> Self {
        Self {
            channel,
            delivered: false,
            error: Some(error.into()),
        }
    }
}

/// overall result of a fan-out send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// every requested channel succeeded
    Sent,
    /// some, but not all, requested channels succeeded
    PartialFailure,
    /// no requested channel succeeded
    Failed,
}

impl DispatchOutcome {
    /// fold per-channel outcomes into the overall result
    pub fn from_outcomes(outcomes: &[ChannelOutcome]) -> Self {
        let delivered = outcomes.iter().filter(|o| o.delivered).count();
        if delivered == outcomes.len() && !outcomes.is_empty() {
            DispatchOutcome::Sent
        } else if delivered > 0 {
            DispatchOutcome::PartialFailure
        } else {
            DispatchOutcome::Failed
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }
}
