//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::seq::SliceRandom;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use key_delivery_core::{CodeId, Credential, CredentialId, RedemptionCode};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// Reads go straight to the database. Mutations of each collection are
/// serialized by a per-collection writer lock, which makes the
/// check-then-write sequences below atomic with respect to each other.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    credential_writes: Mutex<()>,
    code_writes: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            credential_writes: Mutex::new(()),
            code_writes: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Acquire a writer lock.
    ///
    /// The guarded value is `()`, so a poisoned lock carries no broken state
    /// and is simply taken over.
    fn lock(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read every record of a column family, newest key first.
    fn list_newest_first<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let cf = self.cf(name)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::End) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }

    /// Look up the code ID indexed under `value`.
    fn code_id_for_value(&self, value: &str) -> Result<Option<CodeId>> {
        let cf = self.cf(cf::CODES_BY_VALUE)?;

        self.db
            .get_cf(&cf, keys::code_value_key(value))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|entry| keys::code_id_from_index(&entry))
            .transpose()
    }

    /// Remove a code record and its value index entry in one batch.
    fn remove_code(&self, code_id: &CodeId, value: &str) -> Result<()> {
        let cf_codes = self.cf(cf::CODES)?;
        let cf_by_value = self.cf(cf::CODES_BY_VALUE)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_codes, keys::code_key(code_id));
        batch.delete_cf(&cf_by_value, keys::code_value_key(value));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Credential Operations
    // =========================================================================

    fn insert_credential(&self, credential: &Credential) -> Result<()> {
        let cf = self.cf(cf::CREDENTIALS)?;
        let key = keys::credential_key(&credential.id);
        let value = Self::serialize(credential)?;

        let _guard = Self::lock(&self.credential_writes);
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_credentials(&self) -> Result<Vec<Credential>> {
        self.list_newest_first(cf::CREDENTIALS)
    }

    fn delete_credential(&self, credential_id: &CredentialId) -> Result<bool> {
        let cf = self.cf(cf::CREDENTIALS)?;
        let key = keys::credential_key(credential_id);

        let _guard = Self::lock(&self.credential_writes);

        let exists = self
            .db
            .get_pinned_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(true)
    }

    fn pick_random_credential(&self) -> Result<Option<Credential>> {
        let cf = self.cf(cf::CREDENTIALS)?;

        // A single iterator reads from one implicit snapshot.
        let mut values = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            values.push(value);
        }

        values
            .choose(&mut rand::thread_rng())
            .map(|data| Self::deserialize(data))
            .transpose()
    }

    // =========================================================================
    // Code Operations
    // =========================================================================

    fn insert_code(&self, code: &RedemptionCode) -> Result<()> {
        let cf_codes = self.cf(cf::CODES)?;
        let cf_by_value = self.cf(cf::CODES_BY_VALUE)?;

        let code_key = keys::code_key(&code.id);
        let value_key = keys::code_value_key(&code.value);
        let record = Self::serialize(code)?;

        let _guard = Self::lock(&self.code_writes);

        if self.code_id_for_value(&code.value)?.is_some() {
            return Err(StoreError::DuplicateCode {
                value: code.value.clone(),
            });
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_codes, &code_key, &record);
        batch.put_cf(&cf_by_value, &value_key, &code_key);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_code(&self, code_id: &CodeId) -> Result<Option<RedemptionCode>> {
        let cf = self.cf(cf::CODES)?;
        let key = keys::code_key(code_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_codes(&self) -> Result<Vec<RedemptionCode>> {
        self.list_newest_first(cf::CODES)
    }

    fn delete_code(&self, code_id: &CodeId) -> Result<bool> {
        let _guard = Self::lock(&self.code_writes);

        let Some(code) = self.get_code(code_id)? else {
            return Ok(false);
        };

        self.remove_code(&code.id, &code.value)?;

        Ok(true)
    }

    fn find_code_by_value(&self, value: &str) -> Result<Option<RedemptionCode>> {
        match self.code_id_for_value(value)? {
            Some(code_id) => self.get_code(&code_id),
            None => Ok(None),
        }
    }

    fn delete_code_by_value(&self, value: &str) -> Result<bool> {
        let _guard = Self::lock(&self.code_writes);

        let Some(code_id) = self.code_id_for_value(value)? else {
            return Ok(false);
        };

        self.remove_code(&code_id, value)?;

        Ok(true)
    }
}
