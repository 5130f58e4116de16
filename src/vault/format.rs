//! On-disk records file.
//!
//! The collection is a pretty-printed JSON array of `CredentialRecord`
//! objects, rewritten in full on every mutation:
//!
//! ```text
//! [
//!   {
//!     "id": "9f2c4e1a0b3d5c7e",
//!     "website": "example.com",
//!     "username": "bob",
//!     "password": "<base64 nonce|ciphertext|tag>",
//!     "notes": "",
//!     "created_at": "2026-01-01T12:00:00Z",
//!     "updated_at": "2026-01-01T12:00:00Z"
//!   }
//! ]
//! ```
//!
//! Writes go through a temp file + rename.  A missing or blank file is an
//! empty collection; anything else that fails to parse is an error so a
//! corrupt file is never silently replaced by an empty one.
//!
//! Read-modify-write cycles (`RecordFile::modify`) can optionally hold an
//! exclusive lock on `<records file>.lock` for their whole span.  Without
//! it two overlapping writers race and the earlier write can be lost.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::record::CredentialRecord;
use crate::errors::{Result, VaultError};
use crate::persist;

/// Handle to the records file on disk.
#[derive(Debug, Clone)]
pub struct RecordFile {
    path: PathBuf,
    lock_path: PathBuf,
    locking: bool,
}

impl RecordFile {
    /// Records file at `path`.  With `locking` set, `modify` serializes
    /// concurrent read-modify-write cycles through a lock file.
    pub fn new(path: &Path, locking: bool) -> Self {
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");

        Self {
            path: path.to_path_buf(),
            lock_path: path.with_file_name(lock_name),
            locking,
        }
    }

    /// Read the whole collection.
    pub fn load(&self) -> Result<Vec<CredentialRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| VaultError::InvalidRecordsFile(format!("{}: {e}", self.path.display())))
    }

    /// Replace the whole collection on disk **atomically**.
    pub fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| VaultError::SerializationError(format!("records: {e}")))?;

        persist::write_atomic(&self.path, json.as_bytes(), true)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }

    /// Load, apply `f`, and write the result back.
    ///
    /// The collection is saved only if `f` succeeds.  When locking is
    /// enabled the lock is held from before the load until after the save.
    pub fn modify<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<CredentialRecord>) -> Result<R>,
    {
        let _guard = if self.locking {
            Some(self.acquire_lock()?)
        } else {
            None
        };

        let mut records = self.load()?;
        let result = f(&mut records)?;
        self.save(&records)?;

        // The lock is released when `_guard` drops and closes the file.
        Ok(result)
    }

    /// Block until this process holds the exclusive lock.
    fn acquire_lock(&self) -> Result<fs::File> {
        if let Some(parent) = self.lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;

        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    /// Whether read-modify-write cycles are serialized by a lock file.
    pub fn is_locking(&self) -> bool {
        self.locking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(id: &str) -> CredentialRecord {
        let now = Utc::now();
        CredentialRecord {
            id: id.into(),
            website: format!("{id}.example"),
            username: "user".into(),
            password: "ct".into(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(&dir.path().join("passwords.json"), true);
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn blank_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, "  \n").unwrap();
        assert!(RecordFile::new(&path, false).load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, "[{").unwrap();

        let result = RecordFile::new(&path, false).load();
        assert!(matches!(result, Err(VaultError::InvalidRecordsFile(_))));
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(&dir.path().join("passwords.json"), false);
        let records = vec![record("c"), record("a"), record("b")];

        file.save(&records).unwrap();
        assert_eq!(file.load().unwrap(), records);
    }

    #[test]
    fn modify_does_not_save_on_error() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(&dir.path().join("passwords.json"), true);
        file.save(&[record("keep")]).unwrap();

        let result: Result<()> = file.modify(|records| {
            records.clear();
            Err(VaultError::UserCancelled)
        });
        assert!(result.is_err());
        assert_eq!(file.load().unwrap().len(), 1);
    }

    #[test]
    fn lock_file_sits_next_to_records() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(&dir.path().join("passwords.json"), true);
        file.modify(|records| {
            records.push(record("x"));
            Ok(())
        })
        .unwrap();
        assert!(dir.path().join("passwords.json.lock").exists());
    }
}
