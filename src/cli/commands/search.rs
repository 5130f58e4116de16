//! `passvault search` — find entries by website or username.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, query: &str, show: bool) -> Result<()> {
    let vault = unlock(cli)?;
    let matches = vault.search(query)?;

    output::info(&format!("{} match(es) for '{query}'", matches.len()));
    output::print_records_table(&matches, show);

    Ok(())
}
