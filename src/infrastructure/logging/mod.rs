//! Logging - routes message events to `tracing`

use std::sync::Mutex;

use crate::domain::events::MessageEvent;
use crate::domain::traits::EventSink;
use crate::infrastructure::config::LoggingConfig;

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level. Calling this twice is harmless.
pub fn init(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let _ = tracing_subscriber::fmt()
        .with_target(config.with_target)
        .with_env_filter(filter)
        .try_init();
}

/// Sink that writes every event to `tracing` at its severity
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: &MessageEvent) {
        let message_id = event.message_id().map(|id| id.value());
        match event {
            MessageEvent::Created { id } => {
                tracing::info!(message_id, "Message object with id: '{}' is created", id);
            }
            MessageEvent::ContentMissing { id } => {
                tracing::warn!(message_id, "Content is missing for MessageID: '{}'", id);
            }
            MessageEvent::SenderUpdated { id } => {
                tracing::info!(message_id, "Sender updated for MessageID: '{}'", id);
            }
            MessageEvent::ReceiverUpdated { id } => {
                tracing::info!(message_id, "Receiver updated for MessageID: '{}'", id);
            }
            MessageEvent::ContentUpdated { id } => {
                tracing::info!(message_id, "Content updated for MessageID: '{}'", id);
            }
            MessageEvent::Rejected { party, value, .. } => {
                let shown = value.as_deref().unwrap_or("null");
                tracing::error!(
                    message_id,
                    "Invalid '{}' value: '{}'. {} can not be null or empty",
                    party.as_str(),
                    shown,
                    party
                );
            }
            MessageEvent::IdsExhausted => {
                tracing::error!("No message ids left, message not created");
            }
        }
    }
}

/// Sink that keeps events in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MessageEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub fn events(&self) -> Vec<MessageEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: &MessageEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// Sends every event to two sinks, e.g. tracing plus a recorder
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: EventSink, B: EventSink> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn publish(&self, event: &MessageEvent) {
        self.first.publish(event);
        self.second.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessageId, Party};
    use std::sync::Arc;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        let id = MessageId::new(3);
        sink.publish(&MessageEvent::Created { id });
        sink.publish(&MessageEvent::ContentMissing { id });
        assert_eq!(
            sink.events(),
            vec![MessageEvent::Created { id }, MessageEvent::ContentMissing { id }]
        );

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tee_and_tracing_sink() {
        let recorder = Arc::new(RecordingSink::new());
        let tee = Tee::new(TracingSink, Arc::clone(&recorder));
        let event = MessageEvent::Rejected {
            id: None,
            party: Party::Receiver,
            value: Some(String::new()),
        };
        tee.publish(&event);
        assert_eq!(recorder.events(), vec![event]);
    }

    #[test]
    fn test_tracing_sink_handles_every_event() {
        let recorder = Arc::new(RecordingSink::new());
        let tee = Tee::new(TracingSink, Arc::clone(&recorder));
        let id = MessageId::new(7);
        let events = vec![
            MessageEvent::ContentMissing { id },
            MessageEvent::Created { id },
            MessageEvent::SenderUpdated { id },
            MessageEvent::ReceiverUpdated { id },
            MessageEvent::ContentUpdated { id },
            MessageEvent::Rejected { id: Some(id), party: Party::Sender, value: None },
            MessageEvent::IdsExhausted,
        ];
        for event in &events {
            tee.publish(event);
        }
        let ids: Vec<_> = recorder.events().iter().map(|e| e.message_id()).collect();
        assert_eq!(ids, vec![Some(id), Some(id), Some(id), Some(id), Some(id), Some(id), None]);
    }
}
