use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Argon2Params, HashScheme};
use crate::errors::{Result, VaultError};
use crate::generator::DEFAULT_LENGTH;

/// File name of the raw encryption key inside the data directory.
pub const KEY_FILE: &str = "key.key";

/// File name of the JSON records collection inside the data directory.
pub const RECORDS_FILE: &str = "passwords.json";

/// File name of the master credential inside the data directory.
pub const MASTER_FILE: &str = "master_password.hash";

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the key, records,
    /// and master credential files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Hash scheme for a newly set master password.
    #[serde(default)]
    pub hash_scheme: HashScheme,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Length of passwords produced by `generate` (default: 16).
    #[serde(default = "default_generated_password_length")]
    pub generated_password_length: usize,

    /// Hold an exclusive lock across each read-modify-write of the records
    /// file.  Turning this off reproduces the lost-update race between
    /// concurrent writers.
    #[serde(default = "default_lock_records")]
    pub lock_records: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".passvault".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_generated_password_length() -> usize {
    DEFAULT_LENGTH
}

fn default_lock_records() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            hash_scheme: HashScheme::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            generated_password_length: default_generated_password_length(),
            lock_records: default_lock_records(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the three vault files under `<project_dir>/<data_dir>`.
    pub fn paths(&self, project_dir: &Path) -> VaultPaths {
        VaultPaths::in_dir(&project_dir.join(&self.data_dir))
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

/// Locations of the persisted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    pub data_dir: PathBuf,
    pub key_file: PathBuf,
    pub records_file: PathBuf,
    pub master_file: PathBuf,
}

impl VaultPaths {
    /// Standard file names inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            key_file: data_dir.join(KEY_FILE),
            records_file: data_dir.join(RECORDS_FILE),
            master_file: data_dir.join(MASTER_FILE),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
