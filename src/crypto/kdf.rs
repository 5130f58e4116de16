//! Master-password hashing.
//!
//! Two schemes are supported:
//!
//! - **SHA-256** (default): `SHA-256(password || salt_hex)`, hex-encoded.
//!   The salt participates as its hex text, which keeps hashes compatible
//!   with existing `master_password.hash` files.
//! - **Argon2id** (opt-in via `hash_scheme = "argon2id"`): a memory-hard
//!   KDF over the same inputs, for installations that want brute-force
//!   resistance from the hash itself.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Length of the random salt in bytes (256 bits, 64 hex characters).
pub const SALT_LEN: usize = 32;

/// Length of the Argon2id output in bytes.
const HASH_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Which digest turns a master password into the stored hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Sha256,
    Argon2id,
}

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Generate a random salt, returned as lowercase hex.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    hex::encode(salt)
}

/// `SHA-256(password || salt)` as lowercase hex.
pub fn sha256_hash(password: &[u8], salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password);
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Argon2id hash of `password` with `salt`, as lowercase hex.
///
/// Enforces minimum parameters to prevent dangerously weak settings.
pub fn argon2id_hash(password: &[u8], salt: &str, argon2_params: &Argon2Params) -> Result<String> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(VaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(HASH_LEN),
    )
    .map_err(|e| VaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = [0u8; HASH_LEN];
    argon2
        .hash_password_into(password, salt.as_bytes(), &mut out)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let encoded = hex::encode(out);
    out.zeroize();
    Ok(encoded)
}
