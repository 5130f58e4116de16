//! The credential record stored in the vault.
//!
//! `password` holds ciphertext whenever a record is persisted or returned
//! by `Vault::add` / `Vault::list`.  `Vault::get` and `Vault::search`
//! return copies in which it has been replaced by the plaintext.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes in a record id (rendered as 16 hex characters).
const ID_BYTES: usize = 8;

/// One website/username/password entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// True if `needle` (already lowercased) occurs in the website or
    /// username, ignoring case.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.website.to_lowercase().contains(needle)
            || self.username.to_lowercase().contains(needle)
    }

    /// Bump `updated_at` to now, keeping it strictly increasing.
    pub(crate) fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Generate a random record id that is not already in `existing`.
pub fn new_record_id(existing: &[CredentialRecord]) -> String {
    let mut rng = rand::rng();
    loop {
        let mut bytes = [0u8; ID_BYTES];
        rng.fill_bytes(&mut bytes);
        let id = hex::encode(bytes);
        if !existing.iter().any(|r| r.id == id) {
            return id;
        }
    }
}
