//! `passvault update` — change an existing entry.
//!
//! Fields not given on the command line keep their current values.  The
//! password is always re-encrypted, either from the current plaintext
//! (`--keep-password`), a generated one, or a newly entered one.  Only
//! `--keep-password` needs the old password to decrypt.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{read_entry_password, unlock, Cli, Context};
use crate::errors::{Result, VaultError};
use crate::generator::generate_random_password;

/// New values requested for an entry.
pub struct UpdateArgs<'a> {
    pub website: Option<&'a str>,
    pub username: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub generate: bool,
    pub length: Option<usize>,
    pub keep_password: bool,
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, id: &str, args: &UpdateArgs<'_>) -> Result<()> {
    let vault = unlock(cli)?;

    // Listed records keep their ciphertext, so an entry orphaned by a
    // regenerated key can still be given a new password.
    let current = vault
        .list()?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?;

    let password = if args.keep_password {
        let revealed = vault
            .get(id)?
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?;
        Zeroizing::new(revealed.password)
    } else {
        let generated = if args.generate {
            let length = match args.length {
                Some(l) => l,
                None => Context::load(cli)?.settings.generated_password_length,
            };
            Some(generate_random_password(length))
        } else {
            None
        };
        read_entry_password(generated)?
    };
    if password.is_empty() {
        return Err(VaultError::CommandFailed("password is required".into()));
    }

    let website = args.website.unwrap_or(&current.website);
    let username = args.username.unwrap_or(&current.username);
    let notes = args.notes.unwrap_or(&current.notes);

    if !vault.update(id, website, username, &password, notes)? {
        // Deleted by another process between the read and the write.
        return Err(VaultError::RecordNotFound(id.to_string()));
    }

    output::success(&format!("Updated entry '{id}'"));
    Ok(())
}
