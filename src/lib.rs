//! messageapi - a validated message model
//!
//! A [`Message`](domain::entities::Message) holds a sender, a receiver and
//! content under a process-local sequential id. Sender and receiver must be
//! non-empty; empty content is normalized to `""`. The entity records events
//! instead of logging; [`MessageService`](application::services::MessageService)
//! forwards them to an [`EventSink`](domain::traits::EventSink).
//!
//! ```
//! use messageapi::application::services::MessageService;
//! use messageapi::infrastructure::ids::SequentialIdAllocator;
//! use messageapi::infrastructure::logging::TracingSink;
//!
//! let service = MessageService::new(SequentialIdAllocator::new(), TracingSink);
//! let message = service.create("alice", "bob", Some("hi")).unwrap();
//! assert_eq!(message.id().value(), 1);
//! assert!(service.create("", "bob", None).is_err());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
