//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Ids: Identifier allocation
//! - Logging: Event sinks and subscriber setup

pub mod config;
pub mod ids;
pub mod logging;
