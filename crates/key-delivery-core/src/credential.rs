//! Credential records: the deliverable inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_empty, Result};
use crate::CredentialId;

/// A deliverable account entry.
///
/// Credentials are never mutated after creation and are not consumed by a
/// redemption; the same record may be handed out for many codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Record identifier.
    pub id: CredentialId,

    /// Opaque account username.
    pub username: String,

    /// Opaque account secret delivered alongside the username.
    pub secret: String,

    /// When the record was stocked.
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Build a new credential record with a fresh id and timestamp.
    ///
    /// Both fields are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyField` if either field is blank.
    pub fn new(username: &str, secret: &str) -> Result<Self> {
        let username = require_non_empty("username", username)?;
        let secret = require_non_empty("password", secret)?;

        Ok(Self {
            id: CredentialId::generate(),
            username: username.to_string(),
            secret: secret.to_string(),
            created_at: Utc::now(),
        })
    }

    /// The part of the record handed to a redeeming caller.
    #[must_use]
    pub fn delivery(&self) -> DeliveredCredential {
        DeliveredCredential {
            username: self.username.clone(),
            secret: self.secret.clone(),
        }
    }
}

/// Username and secret as delivered by a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredCredential {
    /// Account username.
    pub username: String,
    /// Account secret.
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn new_credential_trims_fields() {
        let credential = Credential::new(" user1 ", "pass1\n").unwrap();
        assert_eq!(credential.username, "user1");
        assert_eq!(credential.secret, "pass1");
    }

    #[test]
    fn blank_secret_is_rejected() {
        let err = Credential::new("user1", "  ").unwrap_err();
        assert_eq!(err, CoreError::EmptyField { field: "password" });
    }

    #[test]
    fn delivery_omits_record_metadata() {
        let credential = Credential::new("user1", "pass1").unwrap();
        let delivered = credential.delivery();
        assert_eq!(delivered.username, "user1");
        assert_eq!(delivered.secret, "pass1");
    }
}
