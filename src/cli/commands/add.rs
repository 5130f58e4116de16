//! `passvault add` — store a new password entry.

use crate::cli::output;
use crate::cli::{read_entry_password, unlock, Cli, Context};
use crate::errors::{Result, VaultError};
use crate::generator::generate_random_password;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    website: &str,
    username: &str,
    notes: &str,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    if website.trim().is_empty() || username.trim().is_empty() {
        return Err(VaultError::CommandFailed(
            "website and username are required".into(),
        ));
    }

    let vault = unlock(cli)?;

    let generated = if generate {
        let length = match length {
            Some(l) => l,
            None => Context::load(cli)?.settings.generated_password_length,
        };
        Some(generate_random_password(length))
    } else {
        None
    };

    let password = read_entry_password(generated)?;
    if password.is_empty() {
        return Err(VaultError::CommandFailed("password is required".into()));
    }

    let record = vault.add(website, username, &password, notes)?;

    output::success(&format!(
        "Added entry {} for {} ({})",
        record.id, record.website, record.username
    ));
    if generate {
        output::tip("Run `passvault get <id>` to view the generated password.");
    }

    Ok(())
}
