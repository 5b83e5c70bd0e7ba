//! Error types for key-delivery storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An active code with the same value already exists.
    #[error("duplicate code: {value}")]
    DuplicateCode {
        /// The code value that is already stocked.
        value: String,
    },
}
