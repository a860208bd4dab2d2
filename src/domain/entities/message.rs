use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::errors::MessageError;
use crate::domain::events::MessageEvent;
use crate::domain::rules::{accept_party, normalize_content, require_party};
use crate::domain::traits::IdAllocator;

/// Process-local message identifier. Not durable across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of the message a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Sender,
    Receiver,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Sender => "sender",
            Party::Receiver => "receiver",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Sender => write!(f, "Sender"),
            Party::Receiver => write!(f, "Receiver"),
        }
    }
}

/// Unvalidated message input, e.g. read from a batch file. Missing fields are
/// treated as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageDraft {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub content: Option<String>,
}

impl MessageDraft {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            receiver: Some(receiver.into()),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A message between a sender and a receiver.
///
/// Sender and receiver are never empty; content is never null and may be
/// empty. The entity does not log: every change is recorded as a
/// [`MessageEvent`] and handed out through [`Message::take_events`].
/// Not `Clone`: a copy would be a second live message under the same id.
#[derive(Debug, Serialize)]
pub struct Message {
    id: MessageId,
    sender: String,
    receiver: String,
    content: String,
    #[serde(skip)]
    events: Vec<MessageEvent>,
}

impl Message {
    /// Validates sender, then receiver, then content. An id is drawn from
    /// `ids` only once both parties are accepted, so a rejected construction
    /// leaves the allocator untouched.
    pub fn new(
        ids: &dyn IdAllocator,
        sender: &str,
        receiver: &str,
        content: Option<&str>,
    ) -> Result<Self, MessageError> {
        Self::build(ids, Some(sender), Some(receiver), content)
    }

    pub fn from_draft(ids: &dyn IdAllocator, draft: &MessageDraft) -> Result<Self, MessageError> {
        Self::build(
            ids,
            draft.sender.as_deref(),
            draft.receiver.as_deref(),
            draft.content.as_deref(),
        )
    }

    fn build(
        ids: &dyn IdAllocator,
        sender: Option<&str>,
        receiver: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, MessageError> {
        let sender = require_party(Party::Sender, sender)?;
        let receiver = require_party(Party::Receiver, receiver)?;
        let (content, missing) = normalize_content(content);

        let id = ids.next_id().ok_or(MessageError::IdsExhausted)?;
        let mut events = Vec::with_capacity(2);
        if missing {
            events.push(MessageEvent::ContentMissing { id });
        }
        events.push(MessageEvent::Created { id });

        Ok(Self {
            id,
            sender,
            receiver,
            content,
            events,
        })
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Fails on an empty value and keeps the previous sender.
    pub fn set_sender(&mut self, sender: impl Into<String>) -> Result<(), MessageError> {
        self.sender = accept_party(Party::Sender, sender.into())?;
        self.events.push(MessageEvent::SenderUpdated { id: self.id });
        Ok(())
    }

    /// Fails on an empty value and keeps the previous receiver.
    pub fn set_receiver(&mut self, receiver: impl Into<String>) -> Result<(), MessageError> {
        self.receiver = accept_party(Party::Receiver, receiver.into())?;
        self.events.push(MessageEvent::ReceiverUpdated { id: self.id });
        Ok(())
    }

    /// Never fails; empty content is stored as `""` with a warning event.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.replace_content(content.into());
    }

    /// Drops the content, the equivalent of assigning null.
    pub fn clear_content(&mut self) {
        self.replace_content(String::new());
    }

    fn replace_content(&mut self, content: String) {
        if content.is_empty() {
            self.events.push(MessageEvent::ContentMissing { id: self.id });
        }
        self.content = content;
        self.events.push(MessageEvent::ContentUpdated { id: self.id });
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<MessageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Equality ignores pending events.
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.sender == other.sender
            && self.receiver == other.receiver
            && self.content == other.content
    }
}

impl Eq for Message {}
