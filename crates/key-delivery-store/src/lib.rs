//! `RocksDB` storage layer for key-delivery.
//!
//! This crate provides persistent storage for the credential inventory and the
//! pool of redemption codes, plus the redemption transaction built on top of it.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `credentials`: Credential records, keyed by `credential_id` (ULID)
//! - `codes`: Active redemption codes, keyed by `code_id` (ULID)
//! - `codes_by_value`: Index from code value to `code_id`, used for lookup and consumption
//!
//! # Example
//!
//! ```no_run
//! use key_delivery_core::{Credential, RedemptionCode};
//! use key_delivery_store::{redeem, RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/key-delivery-db").unwrap();
//!
//! store.insert_credential(&Credential::new("user1", "pass1").unwrap()).unwrap();
//! store.insert_code(&RedemptionCode::new("A1").unwrap()).unwrap();
//!
//! let outcome = redeem(&store, "A1").unwrap();
//! assert!(outcome.success);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod redeem;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use redeem::redeem;
pub use rocks::RocksStore;

use key_delivery_core::{CodeId, Credential, CredentialId, RedemptionCode};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Credential Operations
    // =========================================================================

    /// Insert a credential record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_credential(&self, credential: &Credential) -> Result<()>;

    /// List all credentials, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_credentials(&self) -> Result<Vec<Credential>>;

    /// Delete a credential by ID.
    ///
    /// Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_credential(&self, credential_id: &CredentialId) -> Result<bool>;

    /// Pick one credential uniformly at random from the current inventory.
    ///
    /// Reads the inventory fresh on every call. Returns `None` when it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn pick_random_credential(&self) -> Result<Option<Credential>>;

    // =========================================================================
    // Code Operations
    // =========================================================================

    /// Insert a redemption code.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateCode` if an active code already has this value.
    /// - An error if the database operation fails.
    fn insert_code(&self, code: &RedemptionCode) -> Result<()>;

    /// Get a code by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_code(&self, code_id: &CodeId) -> Result<Option<RedemptionCode>>;

    /// List all active codes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_codes(&self) -> Result<Vec<RedemptionCode>>;

    /// Delete a code by ID.
    ///
    /// Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_code(&self, code_id: &CodeId) -> Result<bool>;

    /// Find the active code with the given value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_code_by_value(&self, value: &str) -> Result<Option<RedemptionCode>>;

    /// Atomically delete the active code with the given value.
    ///
    /// Returns whether this call removed a record. When several callers race on
    /// the same value, exactly one of them observes `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_code_by_value(&self, value: &str) -> Result<bool>;
}
