//! The encryption key file and the field cipher built from it.
//!
//! The key is 32 raw bytes on disk.  `KeyStore::open` never fails because
//! of a bad key: a missing, short, long, or otherwise unusable file is
//! replaced by a freshly generated key.  That recovery is silent for
//! startup but **orphans every password encrypted under the old key**, so
//! it is logged at `warn` and exposed via `KeyStore::origin`.

use std::fs;
use std::path::{Path, PathBuf};

use aes_gcm::{Aes256Gcm, KeyInit};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use super::encryption;
use crate::errors::{Result, VaultError};
use crate::persist;

/// Length of the encryption key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    /// Generate a new random key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Validate raw key material: exact length and accepted by the cipher.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.len() != KEY_LEN {
            return Err(VaultError::KeyLoad(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                data.len()
            )));
        }

        Aes256Gcm::new_from_slice(data)
            .map_err(|e| VaultError::KeyLoad(format!("not a usable AES-256 key: {e}")))?;

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(data);
        Ok(Self { bytes })
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Where the key held by a `KeyStore` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// A valid key file was already on disk.
    Loaded,
    /// No key file existed; a new one was written.
    Created,
    /// The key file was unusable and has been overwritten with a new key.
    /// Passwords encrypted under the previous key can no longer be read.
    Regenerated,
}

/// Owns the process-wide encryption key and performs field encryption.
///
/// Constructed once and handed to the `Vault`; nothing else holds the key.
pub struct KeyStore {
    path: PathBuf,
    origin: KeyOrigin,
    cipher: Aes256Gcm,
}

impl KeyStore {
    /// Load the key at `path`, creating or regenerating it as needed.
    ///
    /// Only an I/O failure while *writing* a new key is surfaced.
    pub fn open(path: &Path) -> Result<Self> {
        let (key, origin) = Self::load_or_create_key(path)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::EncryptionFailed(format!("cipher init: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            origin,
            cipher,
        })
    }

    /// Return a valid key from `path`, self-healing a missing or corrupt file.
    pub fn load_or_create_key(path: &Path) -> Result<(EncryptionKey, KeyOrigin)> {
        if !path.exists() {
            let key = EncryptionKey::generate();
            persist::write_atomic(path, key.as_bytes(), true)?;
            tracing::info!(path = %path.display(), "generated new encryption key");
            return Ok((key, KeyOrigin::Created));
        }

        let reason = match fs::read(path) {
            Ok(data) => {
                let data = Zeroizing::new(data);
                match EncryptionKey::from_slice(&data) {
                    Ok(key) => {
                        tracing::debug!(path = %path.display(), "loaded encryption key");
                        return Ok((key, KeyOrigin::Loaded));
                    }
                    Err(e) => e,
                }
            }
            Err(e) => VaultError::KeyLoad(format!("cannot read key file: {e}")),
        };

        let key = EncryptionKey::generate();
        persist::write_atomic(path, key.as_bytes(), true)?;
        tracing::warn!(
            path = %path.display(),
            %reason,
            "encryption key was invalid and has been regenerated; \
             previously stored passwords can no longer be decrypted"
        );
        Ok((key, KeyOrigin::Regenerated))
    }

    /// Build a store around an existing key without touching disk.
    pub fn with_key(key: &EncryptionKey) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::EncryptionFailed(format!("cipher init: {e}")))?;
        Ok(Self {
            path: PathBuf::new(),
            origin: KeyOrigin::Loaded,
            cipher,
        })
    }

    /// Encrypt one password field into its stored string form.
    pub fn encrypt_field(&self, plaintext: &str) -> Result<String> {
        let sealed = encryption::seal(&self.cipher, plaintext.as_bytes())?;
        Ok(encryption::encode_field(&sealed))
    }

    /// Decrypt a stored password field.
    pub fn decrypt_field(&self, ciphertext: &str) -> Result<String> {
        let sealed = encryption::decode_field(ciphertext)?;
        let plaintext = encryption::open(&self.cipher, &sealed)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::DecryptionFailed
        })
    }

    /// How the key was obtained when this store was opened.
    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Path of the key file (empty for `with_key` stores).
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[test]
    fn creates_key_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");

        let store = KeyStore::open(&path).unwrap();
        assert_eq!(store.origin(), KeyOrigin::Created);
        assert_eq!(fs::read(&path).unwrap().len(), KEY_LEN);
    }

    #[test]
    fn reuses_existing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");

        let first = KeyStore::open(&path).unwrap();
        let ct = first.encrypt_field("S3cr3t!").unwrap();
        let bytes_before = fs::read(&path).unwrap();

        let second = KeyStore::open(&path).unwrap();
        assert_eq!(second.origin(), KeyOrigin::Loaded);
        assert_eq!(fs::read(&path).unwrap(), bytes_before);
        assert_eq!(second.decrypt_field(&ct).unwrap(), "S3cr3t!");
    }

    #[test]
    #[traced_test]
    fn regenerates_wrong_length_key_and_warns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");
        fs::write(&path, [7u8; 44]).unwrap();

        let store = KeyStore::open(&path).unwrap();
        assert_eq!(store.origin(), KeyOrigin::Regenerated);
        assert_eq!(fs::read(&path).unwrap().len(), KEY_LEN);
        assert!(logs_contain("regenerated"));
    }

    #[test]
    fn regenerates_empty_key_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");
        fs::write(&path, b"").unwrap();

        let store = KeyStore::open(&path).unwrap();
        assert_eq!(store.origin(), KeyOrigin::Regenerated);
    }

    #[test]
    fn from_slice_rejects_bad_lengths() {
        assert!(matches!(
            EncryptionKey::from_slice(&[0u8; 31]),
            Err(VaultError::KeyLoad(_))
        ));
        assert!(matches!(
            EncryptionKey::from_slice(&[0u8; 33]),
            Err(VaultError::KeyLoad(_))
        ));
        assert!(EncryptionKey::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn field_roundtrip_handles_unicode_and_empty() {
        let store = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
        for p in ["", "S3cr3t!", "pässwörd 🔐", "line\nbreak\ttab"] {
            let ct = store.encrypt_field(p).unwrap();
            assert_ne!(ct, p);
            assert_eq!(store.decrypt_field(&ct).unwrap(), p);
        }
    }

    #[test]
    fn decrypt_field_under_other_key_fails() {
        let a = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
        let b = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
        let ct = a.encrypt_field("hello").unwrap();
        assert!(matches!(
            b.decrypt_field(&ct),
            Err(VaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn decrypt_field_detects_tampering() {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;

        let store = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
        let ct = store.encrypt_field("integrity").unwrap();
        let mut raw = BASE64.decode(&ct).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;

        assert!(matches!(
            store.decrypt_field(&BASE64.encode(raw)),
            Err(VaultError::DecryptionFailed)
        ));
    }
}
