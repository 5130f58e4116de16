//! `passvault list` — display all entries with passwords hidden.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = unlock(cli)?;
    let records = vault.list()?;

    output::info(&format!("{} entr{}", records.len(), plural(records.len())));
    output::print_records_table(&records, false);

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}
