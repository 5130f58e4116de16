//! `passvault get` — show one entry with its decrypted password.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let vault = unlock(cli)?;

    let record = vault
        .get(id)?
        .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?;

    output::print_record(&record);
    Ok(())
}
