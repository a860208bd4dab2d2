//! Application layer errors

use thiserror::Error;
use crate::domain::entities::Party;

/// Message validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// A required party was null or empty. `value` keeps what was rejected
    /// (`None` for null) so the surrounding layer can report it.
    #[error("{party} can not be null or empty")]
    InvalidArgument {
        party: Party,
        value: Option<String>,
    },

    /// The id allocator has no identifiers left.
    #[error("message ids exhausted")]
    IdsExhausted,
}

impl MessageError {
    pub fn invalid(party: Party, value: Option<&str>) -> Self {
        MessageError::InvalidArgument {
            party,
            value: value.map(|v| v.to_string()),
        }
    }

    pub fn party(&self) -> Option<Party> {
        match self {
            MessageError::InvalidArgument { party, .. } => Some(*party),
            MessageError::IdsExhausted => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
