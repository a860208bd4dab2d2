//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Message creation and mutation, event publishing
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
