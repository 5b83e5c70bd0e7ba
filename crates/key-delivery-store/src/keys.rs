//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use key_delivery_core::{CodeId, CredentialId};

use crate::error::{Result, StoreError};

/// Create a credential key from a credential ID.
#[must_use]
pub fn credential_key(credential_id: &CredentialId) -> Vec<u8> {
    credential_id.to_bytes().to_vec()
}

/// Create a code key from a code ID.
#[must_use]
pub fn code_key(code_id: &CodeId) -> Vec<u8> {
    code_id.to_bytes().to_vec()
}

/// Create a code-by-value index key.
#[must_use]
pub fn code_value_key(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode the code ID stored as the value of a code-by-value index entry.
///
/// # Errors
///
/// Returns `StoreError::Database` if the entry is not exactly 16 bytes.
pub fn code_id_from_index(value: &[u8]) -> Result<CodeId> {
    let bytes: [u8; 16] = value.try_into().map_err(|_| {
        StoreError::Database(format!(
            "malformed code index entry: expected 16 bytes, got {}",
            value.len()
        ))
    })?;
    Ok(CodeId::from_bytes(bytes))
}
