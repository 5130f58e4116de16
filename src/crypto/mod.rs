//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM sealing of single password fields (`encryption`)
//! - The self-healing encryption key file and field cipher (`keystore`)
//! - Salted master-password hashing, SHA-256 or Argon2id (`kdf`)

pub mod encryption;
pub mod kdf;
pub mod keystore;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{KeyStore, HashScheme, ...};
pub use kdf::{generate_salt, Argon2Params, HashScheme};
pub use keystore::{EncryptionKey, KeyOrigin, KeyStore, KEY_LEN};
