//! AES-256-GCM authenticated encryption of single password fields.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting.
//!
//! Layout of a sealed buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! For persistence the sealed buffer is carried as a standard base64
//! string (`encode_field` / `decode_field`), so a stored password is a
//! single self-contained JSON string.

use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `cipher`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn seal(cipher: &Aes256Gcm, plaintext: &[u8]) -> Result<Vec<u8>> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a buffer produced by `seal`.
///
/// Any malformed input, foreign key, or failed tag check collapses into
/// `DecryptionFailed` so callers cannot distinguish the cases.
pub fn open(cipher: &Aes256Gcm, sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)
}

/// Encode a sealed buffer as the string stored in the records file.
pub fn encode_field(sealed: &[u8]) -> String {
    BASE64.encode(sealed)
}

/// Decode a stored field string back into a sealed buffer.
pub fn decode_field(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded.trim())
        .map_err(|_| VaultError::DecryptionFailed)
}
