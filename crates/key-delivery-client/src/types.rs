//! Request and response types for the key-delivery API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use key_delivery_core::redemption::{INVALID_CODE_MESSAGE, NO_INVENTORY_MESSAGE};
use key_delivery_core::RedemptionFailure;

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// A stocked credential.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Record ID.
    pub id: String,
    /// Account username.
    pub username: String,
    /// Account secret.
    pub password: String,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAccountRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// A stocked redemption code.
#[derive(Debug, Clone, Deserialize)]
pub struct Key {
    /// Record ID.
    pub id: String,
    /// The redeemable value.
    pub key_value: String,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateKeyRequest<'a> {
    pub key_value: &'a str,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

// ============================================================================
// Redemption
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct RedeemRequest<'a> {
    pub key: &'a str,
}

/// Credential delivered by a successful redemption.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveredAccount {
    /// Account username.
    pub username: String,
    /// Account secret.
    pub password: String,
}

/// Redemption response.
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemResponse {
    /// Whether an account was delivered.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// The delivered account, present only on success.
    #[serde(default)]
    pub account: Option<DeliveredAccount>,
}

impl RedeemResponse {
    /// Classify an unsuccessful redemption from its message.
    #[must_use]
    pub fn failure(&self) -> Option<RedemptionFailure> {
        if self.success {
            return None;
        }
        match self.message.as_str() {
            INVALID_CODE_MESSAGE => Some(RedemptionFailure::InvalidCode),
            NO_INVENTORY_MESSAGE => Some(RedemptionFailure::NoInventory),
            _ => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// API error response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(success: bool, message: &str) -> RedeemResponse {
        RedeemResponse {
            success,
            message: message.to_string(),
            account: None,
        }
    }

    #[test]
    fn failure_classification() {
        assert_eq!(
            response(false, INVALID_CODE_MESSAGE).failure(),
            Some(RedemptionFailure::InvalidCode)
        );
        assert_eq!(
            response(false, NO_INVENTORY_MESSAGE).failure(),
            Some(RedemptionFailure::NoInventory)
        );
        assert_eq!(response(true, "ok").failure(), None);
        assert_eq!(response(false, "something else").failure(), None);
    }

    #[test]
    fn redeem_response_without_account() {
        let parsed: RedeemResponse =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(parsed.account.is_none());
    }
}
