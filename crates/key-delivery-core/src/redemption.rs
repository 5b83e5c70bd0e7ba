//! Redemption outcomes.
//!
//! An outcome is the ephemeral result of one redemption attempt. It is never
//! persisted: a successful redemption leaves no trace beyond the deleted code.

use serde::{Deserialize, Serialize};

use crate::DeliveredCredential;

/// Message returned when a code was redeemed.
pub const REDEEMED_MESSAGE: &str = "Account delivered successfully. The key has been used.";

/// Message returned when no active code matches the submitted value.
pub const INVALID_CODE_MESSAGE: &str = "Invalid key. Please check the key and try again.";

/// Message returned when the credential inventory is empty.
pub const NO_INVENTORY_MESSAGE: &str = "No accounts are available for delivery right now.";

/// Why a redemption did not deliver a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionFailure {
    /// No active code matches the submitted value.
    InvalidCode,
    /// The code is valid but there is nothing to deliver. The code is kept.
    NoInventory,
}

impl RedemptionFailure {
    /// Human-readable reason shown to the caller.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidCode => INVALID_CODE_MESSAGE,
            Self::NoInventory => NO_INVENTORY_MESSAGE,
        }
    }
}

/// Result of a single redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionOutcome {
    /// Whether a credential was delivered.
    pub success: bool,
    /// Human-readable reason.
    pub message: String,
    /// Failure kind, set whenever `success` is false.
    pub failure: Option<RedemptionFailure>,
    /// The delivered credential, set whenever `success` is true.
    pub account: Option<DeliveredCredential>,
}

impl RedemptionOutcome {
    /// A successful redemption delivering `account`.
    #[must_use]
    pub fn delivered(account: DeliveredCredential) -> Self {
        Self {
            success: true,
            message: REDEEMED_MESSAGE.to_string(),
            failure: None,
            account: Some(account),
        }
    }

    /// A failed redemption.
    #[must_use]
    pub fn failed(failure: RedemptionFailure) -> Self {
        Self {
            success: false,
            message: failure.message().to_string(),
            failure: Some(failure),
            account: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_carries_reason() {
        let outcome = RedemptionOutcome::failed(RedemptionFailure::NoInventory);
        assert!(!outcome.success);
        assert_eq!(outcome.message, NO_INVENTORY_MESSAGE);
        assert_eq!(outcome.failure, Some(RedemptionFailure::NoInventory));
        assert!(outcome.account.is_none());
    }

    #[test]
    fn delivered_outcome_carries_account() {
        let outcome = RedemptionOutcome::delivered(DeliveredCredential {
            username: "u1".into(),
            secret: "p1".into(),
        });
        assert!(outcome.success);
        assert!(outcome.failure.is_none());
        assert_eq!(outcome.account.unwrap().username, "u1");
    }

    #[test]
    fn failure_serializes_snake_case() {
        let json = serde_json::to_string(&RedemptionFailure::InvalidCode).unwrap();
        assert_eq!(json, "\"invalid_code\"");
    }
}
