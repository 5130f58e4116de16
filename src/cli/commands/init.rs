//! `passvault init` — set the master password on first use.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::{Result, VaultError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let auth = ctx.authenticator();

    // The overwrite path of `set_master_password` is never offered here.
    if auth.is_initialized() {
        return Err(VaultError::AlreadyInitialized(auth.path().to_path_buf()));
    }

    let password = prompt_new_password()?;
    auth.set_master_password(password.as_bytes())?;

    // Create the encryption key now rather than on the first `add`.
    ctx.open_vault()?;

    output::success(&format!(
        "Vault initialized at {}",
        ctx.paths.data_dir.display()
    ));
    output::tip("Run `passvault add <website> <username>` to store a password.");
    output::tip("Run `passvault generate` to create a strong random password.");

    Ok(())
}
