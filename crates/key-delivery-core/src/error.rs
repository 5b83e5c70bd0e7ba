//! Error types for key-delivery.

use crate::ids::IdError;

/// Result type for key-delivery core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building or validating records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required field was empty after trimming whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field as it appears on the wire.
        field: &'static str,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}

/// Trim `raw` and reject it if nothing is left.
///
/// # Errors
///
/// Returns `CoreError::EmptyField` when `raw` is empty or whitespace only.
pub fn require_non_empty<'a>(field: &'static str, raw: &'a str) -> Result<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyField { field });
    }
    Ok(trimmed)
}
