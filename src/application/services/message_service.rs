use crate::application::errors::MessageError;
use crate::domain::entities::{Message, MessageDraft};
use crate::domain::events::MessageEvent;
use crate::domain::traits::{EventSink, IdAllocator};

/// Service for creating and updating messages.
///
/// Owns the id allocator, so every message created through one service gets a
/// distinct id, and forwards all entity events (and rejections) to the sink.
pub struct MessageService<A: IdAllocator, S: EventSink> {
    ids: A,
    sink: S,
}

impl<A: IdAllocator, S: EventSink> MessageService<A, S> {
    pub fn new(ids: A, sink: S) -> Self {
        Self { ids, sink }
    }

    pub fn ids(&self) -> &A {
        &self.ids
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn create(
        &self,
        sender: &str,
        receiver: &str,
        content: Option<&str>,
    ) -> Result<Message, MessageError> {
        let result = Message::new(&self.ids, sender, receiver, content);
        self.finish_create(result)
    }

    pub fn create_from_draft(&self, draft: &MessageDraft) -> Result<Message, MessageError> {
        let result = Message::from_draft(&self.ids, draft);
        self.finish_create(result)
    }

    /// One result per draft, in order. A rejected draft does not stop the
    /// rest of the batch.
    pub fn create_batch(&self, drafts: &[MessageDraft]) -> Vec<Result<Message, MessageError>> {
        drafts.iter().map(|d| self.create_from_draft(d)).collect()
    }

    pub fn update_sender(&self, message: &mut Message, sender: &str) -> Result<(), MessageError> {
        let result = message.set_sender(sender);
        self.finish_update(message, result)
    }

    pub fn update_receiver(&self, message: &mut Message, receiver: &str) -> Result<(), MessageError> {
        let result = message.set_receiver(receiver);
        self.finish_update(message, result)
    }

    pub fn update_content(&self, message: &mut Message, content: &str) {
        message.set_content(content);
        self.flush(message);
    }

    pub fn clear_content(&self, message: &mut Message) {
        message.clear_content();
        self.flush(message);
    }

    fn finish_create(&self, result: Result<Message, MessageError>) -> Result<Message, MessageError> {
        match result {
            Ok(mut message) => {
                self.flush(&mut message);
                Ok(message)
            }
            Err(e) => {
                self.reject(None, &e);
                Err(e)
            }
        }
    }

    fn finish_update(
        &self,
        message: &mut Message,
        result: Result<(), MessageError>,
    ) -> Result<(), MessageError> {
        if let Err(e) = &result {
            self.reject(Some(&*message), e);
        }
        self.flush(message);
        result
    }

    fn reject(&self, message: Option<&Message>, error: &MessageError) {
        let event = match error {
            MessageError::InvalidArgument { party, value } => MessageEvent::Rejected {
                id: message.map(|m| m.id()),
                party: *party,
                value: value.clone(),
            },
            MessageError::IdsExhausted => MessageEvent::IdsExhausted,
        };
        self.sink.publish(&event);
    }

    fn flush(&self, message: &mut Message) {
        for event in message.take_events() {
            self.sink.publish(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessageId, Party};
    use crate::infrastructure::ids::SequentialIdAllocator;
    use crate::infrastructure::logging::RecordingSink;

    fn service() -> MessageService<SequentialIdAllocator, RecordingSink> {
        MessageService::new(SequentialIdAllocator::new(), RecordingSink::new())
    }

    #[test]
    fn test_create_publishes_events() {
        let svc = service();
        let msg = svc.create("alice", "bob", None).unwrap();
        assert!(!msg.has_pending_events());
        assert_eq!(
            svc.sink().events(),
            vec![
                MessageEvent::ContentMissing { id: MessageId::new(1) },
                MessageEvent::Created { id: MessageId::new(1) },
            ]
        );
    }

    #[test]
    fn test_create_rejection_is_published() {
        let svc = service();
        let err = svc.create("", "bob", Some("hi")).unwrap_err();
        assert_eq!(err.party(), Some(Party::Sender));
        assert_eq!(
            svc.sink().events(),
            vec![MessageEvent::Rejected {
                id: None,
                party: Party::Sender,
                value: Some(String::new()),
            }]
        );
        assert_eq!(svc.ids().peek().value(), 1);
    }

    #[test]
    fn test_update_rejection_carries_id() {
        let svc = service();
        let mut msg = svc.create("alice", "bob", Some("hi")).unwrap();
        svc.sink().clear();

        assert!(svc.update_receiver(&mut msg, "").is_err());
        assert_eq!(msg.receiver(), "bob");
        assert_eq!(
            svc.sink().events(),
            vec![MessageEvent::Rejected {
                id: Some(msg.id()),
                party: Party::Receiver,
                value: Some(String::new()),
            }]
        );
    }

    #[test]
    fn test_update_content_with_empty_value() {
        let svc = service();
        let mut msg = svc.create("alice", "bob", Some("hi")).unwrap();
        svc.sink().clear();

        svc.update_content(&mut msg, "");
        assert_eq!(msg.content(), "");
        assert_eq!(
            svc.sink().events(),
            vec![
                MessageEvent::ContentMissing { id: msg.id() },
                MessageEvent::ContentUpdated { id: msg.id() },
            ]
        );
    }

    #[test]
    fn test_exhausted_ids_are_published() {
        let svc = MessageService::new(SequentialIdAllocator::starting_at(u64::MAX), RecordingSink::new());
        let err = svc.create("alice", "bob", Some("hi")).unwrap_err();
        assert_eq!(err, MessageError::IdsExhausted);
        assert_eq!(svc.sink().events(), vec![MessageEvent::IdsExhausted]);
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let svc = service();
        let drafts = vec![
            MessageDraft::new("alice", "bob").with_content("one"),
            MessageDraft { sender: Some("alice".into()), receiver: None, content: None },
            MessageDraft::new("carol", "dave"),
        ];
        let results = svc.create_batch(&drafts);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().id().value(), 1);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().id().value(), 2);
    }
}
