//! Redemption code records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_empty, Result};
use crate::CodeId;

/// A single-use redemption code.
///
/// A code exists in the store only while it is unredeemed; redeeming it
/// deletes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionCode {
    /// Record identifier.
    pub id: CodeId,

    /// The value a caller submits to redeem the code.
    pub value: String,

    /// When the code was stocked.
    pub created_at: DateTime<Utc>,
}

impl RedemptionCode {
    /// Build a new code record with a fresh id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyField` if the value is blank.
    pub fn new(value: &str) -> Result<Self> {
        Ok(Self {
            id: CodeId::generate(),
            value: normalize_code_value(value)?.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Normalize a submitted code value the same way stored values are normalized.
///
/// # Errors
///
/// Returns `CoreError::EmptyField` if the value is blank.
pub fn normalize_code_value(raw: &str) -> Result<&str> {
    require_non_empty("key", raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_code_is_trimmed() {
        let code = RedemptionCode::new("  STEAM-KEY-001 ").unwrap();
        assert_eq!(code.value, "STEAM-KEY-001");
    }

    #[test]
    fn submitted_and_stored_values_normalize_alike() {
        let code = RedemptionCode::new("A1").unwrap();
        assert_eq!(normalize_code_value(" A1\t").unwrap(), code.value);
    }

    #[test]
    fn blank_code_is_rejected() {
        assert!(RedemptionCode::new("   ").is_err());
    }
}
