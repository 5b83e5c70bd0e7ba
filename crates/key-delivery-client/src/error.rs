//! Client error types.

/// Errors that can occur when using the key-delivery client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing, wrong or expired admin credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Record not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Record already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
