//! `passvault delete` — remove an entry.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{id}'?"))
            .default(false)
            .interact_opt()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?
            .ok_or(VaultError::UserCancelled)?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let vault = unlock(cli)?;

    let existed = vault.list()?.iter().any(|r| r.id == id);
    vault.delete(id)?;

    if existed {
        output::success(&format!("Deleted entry '{id}'"));
    } else {
        output::info(&format!("No entry '{id}', nothing to delete."));
    }

    Ok(())
}
