//! Master-password authentication.
//!
//! The master credential is a small JSON object persisted on its own:
//!
//! ```text
//! {"hash": "<hex>", "salt": "<hex>"}
//! ```
//!
//! It is created on first use and never rotated here.  Credentials hashed
//! with Argon2id carry two extra fields (`scheme`, `argon2_params`); their
//! absence means the SHA-256 scheme.
//!
//! There is no lockout or throttling of failed attempts.  A shell that
//! needs brute-force resistance must add rate limiting around `verify`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::crypto::kdf::{self, Argon2Params, HashScheme};
use crate::errors::{Result, VaultError};
use crate::persist;

/// The persisted `{hash, salt}` pair gating vault access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterCredential {
    /// Hex-encoded digest of `password || salt`.
    pub hash: String,

    /// Hex-encoded random salt.
    pub salt: String,

    #[serde(default, skip_serializing_if = "is_sha256")]
    pub scheme: HashScheme,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argon2_params: Option<Argon2Params>,
}

fn is_sha256(scheme: &HashScheme) -> bool {
    *scheme == HashScheme::Sha256
}

impl MasterCredential {
    /// Hash `password` with a fresh salt under `scheme`.
    pub fn derive(password: &[u8], scheme: HashScheme, params: &Argon2Params) -> Result<Self> {
        let salt = kdf::generate_salt();
        let (hash, argon2_params) = match scheme {
            HashScheme::Sha256 => (kdf::sha256_hash(password, &salt), None),
            HashScheme::Argon2id => (kdf::argon2id_hash(password, &salt, params)?, Some(*params)),
        };

        Ok(Self {
            hash,
            salt,
            scheme,
            argon2_params,
        })
    }

    /// Recompute the hash for `password` and compare in constant time.
    pub fn matches(&self, password: &[u8]) -> Result<bool> {
        let candidate = match self.scheme {
            HashScheme::Sha256 => kdf::sha256_hash(password, &self.salt),
            HashScheme::Argon2id => {
                let params = self.argon2_params.unwrap_or_default();
                kdf::argon2id_hash(password, &self.salt, &params)?
            }
        };

        Ok(candidate
            .as_bytes()
            .ct_eq(self.hash.to_ascii_lowercase().as_bytes())
            .into())
    }
}

/// Gatekeeper for the vault: first-use setup and password verification.
#[derive(Debug, Clone)]
pub struct Authenticator {
    path: PathBuf,
    scheme: HashScheme,
    argon2_params: Argon2Params,
}

impl Authenticator {
    /// Authenticator backed by the credential file at `path`, hashing new
    /// credentials with SHA-256.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            scheme: HashScheme::Sha256,
            argon2_params: Argon2Params::default(),
        }
    }

    /// Use `scheme` (and `params` for Argon2id) for newly set credentials.
    ///
    /// Verification always follows the scheme recorded in the file.
    pub fn with_scheme(mut self, scheme: HashScheme, params: Argon2Params) -> Self {
        self.scheme = scheme;
        self.argon2_params = params;
        self
    }

    /// True iff a master credential has been persisted.
    pub fn is_initialized(&self) -> bool {
        self.path.is_file()
    }

    /// Derive and persist a new master credential.
    ///
    /// Overwrites any existing credential; shells must only offer this
    /// before first use.
    pub fn set_master_password(&self, password: &[u8]) -> Result<()> {
        let credential = MasterCredential::derive(password, self.scheme, &self.argon2_params)?;

        let json = serde_json::to_vec(&credential)
            .map_err(|e| VaultError::SerializationError(format!("master credential: {e}")))?;
        persist::write_atomic(&self.path, &json, true)?;

        tracing::info!(path = %self.path.display(), scheme = ?self.scheme, "master password set");
        Ok(())
    }

    /// Check `password` against the persisted credential.
    ///
    /// Returns `Ok(false)` when no credential exists yet.  Only an
    /// unreadable or malformed credential file is an error.
    pub fn verify(&self, password: &[u8]) -> Result<bool> {
        let Some(credential) = self.load_credential()? else {
            return Ok(false);
        };

        let ok = credential.matches(password)?;
        if !ok {
            tracing::debug!("master password rejected");
        }
        Ok(ok)
    }

    /// Read the persisted credential, if any.
    pub fn load_credential(&self) -> Result<Option<MasterCredential>> {
        if !self.is_initialized() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let credential = serde_json::from_slice(&data).map_err(|e| {
            VaultError::InvalidCredentialFile(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(credential))
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
