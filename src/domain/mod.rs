//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message)
//! - Events: What happened to an entity, reported by the application layer
//! - Traits: Abstractions for infrastructure (IdAllocator, EventSink)
//! - Rules: Business logic invariants

pub mod entities;
pub mod events;
pub mod rules;
pub mod traits;
