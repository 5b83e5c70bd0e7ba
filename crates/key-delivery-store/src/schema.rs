//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Credential records, keyed by `credential_id` (ULID).
    pub const CREDENTIALS: &str = "credentials";

    /// Active redemption codes, keyed by `code_id` (ULID).
    pub const CODES: &str = "codes";

    /// Index: codes by value, keyed by the UTF-8 code value.
    /// Value is the `code_id` bytes.
    pub const CODES_BY_VALUE: &str = "codes_by_value";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::CREDENTIALS, cf::CODES, cf::CODES_BY_VALUE]
}
