//! API handlers.

pub mod accounts;
pub mod admin;
pub mod health;
pub mod keys;
pub mod redeem;

use serde::Serialize;

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl DeletedResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
