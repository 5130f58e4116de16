//! High-level vault operations used by the CLI.
//!
//! `Vault` owns the `KeyStore` it was given and a `RecordFile`.  Every
//! operation is a self-contained pass over the persisted collection:
//! nothing is cached between calls.  Callers are expected to have passed
//! `Authenticator::verify` first; the vault does not re-check.

use chrono::Utc;

use super::format::RecordFile;
use super::record::{new_record_id, CredentialRecord};
use crate::crypto::KeyStore;
use crate::errors::Result;

/// The credential collection plus the cipher that protects it.
pub struct Vault {
    keys: KeyStore,
    records: RecordFile,
}

impl Vault {
    /// Build a vault from an already-opened key store and records file.
    pub fn new(keys: KeyStore, records: RecordFile) -> Self {
        Self { keys, records }
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Add a new entry and return it with the password still encrypted.
    pub fn add(
        &self,
        website: &str,
        username: &str,
        password: &str,
        notes: &str,
    ) -> Result<CredentialRecord> {
        let encrypted = self.keys.encrypt_field(password)?;

        let record = self.records.modify(|records| {
            let now = Utc::now();
            let record = CredentialRecord {
                id: new_record_id(records),
                website: website.to_string(),
                username: username.to_string(),
                password: encrypted,
                notes: notes.to_string(),
                created_at: now,
                updated_at: now,
            };
            records.push(record.clone());
            Ok(record)
        })?;

        tracing::debug!(id = %record.id, "added record");
        Ok(record)
    }

    /// Fetch one entry with its password decrypted.
    ///
    /// Returns `Ok(None)` for an unknown id and `DecryptionFailed` if the
    /// stored password was encrypted under a different key.
    pub fn get(&self, id: &str) -> Result<Option<CredentialRecord>> {
        self.records
            .load()?
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| self.reveal(r))
            .transpose()
    }

    /// Overwrite every editable field of an entry.
    ///
    /// `created_at` and `id` are preserved and `updated_at` moves forward.
    /// Returns `false` if no entry has this id.
    pub fn update(
        &self,
        id: &str,
        website: &str,
        username: &str,
        password: &str,
        notes: &str,
    ) -> Result<bool> {
        let encrypted = self.keys.encrypt_field(password)?;

        let found = self.records.modify(|records| {
            let Some(record) = records.iter_mut().find(|r| r.id == id) else {
                return Ok(false);
            };
            record.website = website.to_string();
            record.username = username.to_string();
            record.password = encrypted;
            record.notes = notes.to_string();
            record.touch();
            Ok(true)
        })?;

        tracing::debug!(%id, found, "updated record");
        Ok(found)
    }

    /// Remove an entry.  An unknown id is not an error.
    pub fn delete(&self, id: &str) -> Result<()> {
        let removed = self.records.modify(|records| {
            let before = records.len();
            records.retain(|r| r.id != id);
            Ok(before != records.len())
        })?;

        tracing::debug!(%id, removed, "deleted record");
        Ok(())
    }

    /// Case-insensitive substring search over website and username.
    ///
    /// Matches come back decrypted, in stored order.  An empty query
    /// matches every entry.
    pub fn search(&self, query: &str) -> Result<Vec<CredentialRecord>> {
        let needle = query.to_lowercase();

        self.records
            .load()?
            .into_iter()
            .filter(|r| r.matches(&needle))
            .map(|r| self.reveal(r))
            .collect()
    }

    /// All entries in stored order, passwords left encrypted.
    pub fn list(&self) -> Result<Vec<CredentialRecord>> {
        self.records.load()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The key store this vault encrypts with.
    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    fn reveal(&self, mut record: CredentialRecord) -> Result<CredentialRecord> {
        record.password = self.keys.decrypt_field(&record.password)?;
        Ok(record)
    }
}
