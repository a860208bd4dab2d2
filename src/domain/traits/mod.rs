//! Domain traits - Abstractions for infrastructure implementations

pub mod ids;
pub mod sink;

pub use ids::IdAllocator;
pub use sink::EventSink;
