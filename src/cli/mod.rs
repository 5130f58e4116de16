//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::Authenticator;
use crate::config::{Settings, VaultPaths};
use crate::crypto::{KeyOrigin, KeyStore};
use crate::errors::{Result, VaultError};
use crate::vault::{RecordFile, Vault};

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local password vault with per-entry encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the key, records, and master password files
    /// (default: `data_dir` from .passvault.toml, else .passvault)
    #[arg(long, env = "PASSVAULT_DIR", global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the master password (first use only)
    Init,

    /// Add a password entry
    Add {
        /// Website or service name
        website: String,
        /// Account username
        username: String,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Show one entry with its password
    Get {
        /// Entry id (see `list`)
        id: String,
    },

    /// List all entries (passwords hidden)
    List,

    /// Update an entry; omitted fields keep their current value
    Update {
        /// Entry id
        id: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Generate a new random password
        #[arg(short, long, conflicts_with = "keep_password")]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
        /// Keep the current password
        #[arg(long)]
        keep_password: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Search entries by website or username (case-insensitive)
    Search {
        /// Text to look for; empty matches everything
        query: String,
        /// Show passwords in the results
        #[arg(long)]
        show: bool,
    },

    /// Generate a random password (no vault access)
    Generate {
        /// Password length (default: generated_password_length from config)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Settings and resolved paths for one invocation.
pub struct Context {
    pub settings: Settings,
    pub paths: VaultPaths,
}

impl Context {
    /// Load `.passvault.toml` from the working directory and resolve paths,
    /// letting `--data-dir` override the configured directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut settings = Settings::load(&cwd)?;
        if let Some(dir) = &cli.data_dir {
            settings.data_dir.clone_from(dir);
        }
        let paths = settings.paths(&cwd);
        Ok(Self { settings, paths })
    }

    /// Authenticator configured with the settings' hash scheme.
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(&self.paths.master_file)
            .with_scheme(self.settings.hash_scheme, self.settings.argon2_params())
    }

    /// Open the key store and records file.
    ///
    /// Warns on the terminal when the key had to be regenerated while
    /// entries encrypted under the old key are still on disk.
    pub fn open_vault(&self) -> Result<Vault> {
        let keys = KeyStore::open(&self.paths.key_file)?;
        let records = RecordFile::new(&self.paths.records_file, self.settings.lock_records);
        let vault = Vault::new(keys, records);

        if vault.keys().origin() == KeyOrigin::Regenerated {
            let orphaned = vault.list().map(|r| r.len()).unwrap_or(0);
            if orphaned > 0 {
                output::warning(&format!(
                    "Encryption key at {} was invalid and has been regenerated; \
                     {orphaned} stored password(s) can no longer be decrypted.",
                    vault.keys().path().display()
                ));
            }
        }

        Ok(vault)
    }
}

/// Authenticate and open the vault.
///
/// On a vault without a master password the first password entered
/// becomes the master password (after confirmation) and unlocks it.
pub fn unlock(cli: &Cli) -> Result<Vault> {
    let ctx = Context::load(cli)?;
    let auth = ctx.authenticator();

    if auth.is_initialized() {
        let password = prompt_password()?;
        if !auth.verify(password.as_bytes())? {
            return Err(VaultError::InvalidMasterPassword);
        }
    } else {
        output::info("No master password set yet. Choose one now.");
        let password = prompt_new_password()?;
        auth.set_master_password(password.as_bytes())?;
        output::success("Master password set.");
    }

    ctx.open_vault()
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Read the password for an entry, from one of:
/// 1. `generated` (already produced by `--generate`)
/// 2. Piped stdin (first line, trailing newline stripped)
/// 3. Interactive hidden prompt with confirmation
pub fn read_entry_password(generated: Option<String>) -> Result<Zeroizing<String>> {
    if let Some(pw) = generated {
        return Ok(Zeroizing::new(pw));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let line = buf.lines().next().unwrap_or_default().to_string();
        return Ok(Zeroizing::new(line));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Entry password")
        .with_confirmation("Confirm entry password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
