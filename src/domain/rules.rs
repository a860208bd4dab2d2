//! Validation rules shared by construction and mutation

use crate::application::errors::MessageError;
use crate::domain::entities::Party;

/// A party must be present and non-empty. Whitespace-only values pass.
pub fn require_party(party: Party, value: Option<&str>) -> Result<String, MessageError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        other => Err(MessageError::invalid(party, other)),
    }
}

/// Owned variant of [`require_party`]; moves the value instead of copying it.
pub fn accept_party(party: Party, value: String) -> Result<String, MessageError> {
    if value.is_empty() {
        return Err(MessageError::invalid(party, Some("")));
    }
    Ok(value)
}

/// Returns the content to store and whether it was missing.
pub fn normalize_content(value: Option<&str>) -> (String, bool) {
    match value {
        Some(v) if !v.is_empty() => (v.to_string(), false),
        _ => (String::new(), true),
    }
}
