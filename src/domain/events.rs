//! Domain events recorded by entities and published by the application layer

use crate::domain::entities::{MessageId, Party};

/// How loudly an event should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Something that happened to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEvent {
    Created { id: MessageId },
    ContentMissing { id: MessageId },
    SenderUpdated { id: MessageId },
    ReceiverUpdated { id: MessageId },
    ContentUpdated { id: MessageId },
    /// A sender/receiver value was refused. `id` is `None` when the message
    /// was never constructed.
    Rejected {
        id: Option<MessageId>,
        party: Party,
        value: Option<String>,
    },
    /// No identifier was left for a new message.
    IdsExhausted,
}

impl MessageEvent {
    pub fn severity(&self) -> Severity {
        match self {
            MessageEvent::ContentMissing { .. } => Severity::Warn,
            MessageEvent::Rejected { .. } | MessageEvent::IdsExhausted => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            MessageEvent::Created { id }
            | MessageEvent::ContentMissing { id }
            | MessageEvent::SenderUpdated { id }
            | MessageEvent::ReceiverUpdated { id }
            | MessageEvent::ContentUpdated { id } => Some(*id),
            MessageEvent::Rejected { id, .. } => *id,
            MessageEvent::IdsExhausted => None,
        }
    }
}
