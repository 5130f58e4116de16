use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — password was encrypted under a different key or is corrupted")]
    DecryptionFailed,

    /// An unusable key file. Never returned by `KeyStore::open`, which
    /// regenerates the key instead.
    #[error("Invalid encryption key: {0}")]
    KeyLoad(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Authentication errors ---
    #[error("Master password already set at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid master password")]
    InvalidMasterPassword,

    #[error("Invalid master credential file: {0}")]
    InvalidCredentialFile(String),

    // --- Vault errors ---
    #[error("Password entry '{0}' not found")]
    RecordNotFound(String),

    #[error("Invalid records file: {0}")]
    InvalidRecordsFile(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Persistence errors ---
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
