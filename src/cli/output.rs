//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialRecord;

/// What the password column shows when passwords are hidden.
pub const MASK: &str = "••••••••••••";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries.  With `reveal` unset the password column is
/// masked; with it set the records must already be decrypted.
pub fn print_records_table(records: &[CredentialRecord], reveal: bool) {
    if records.is_empty() {
        info("No entries found.");
        tip("Run `passvault add <website> <username>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Website", "Username", "Password", "Updated"]);

    for r in records {
        let password = if reveal { r.password.as_str() } else { MASK };
        table.add_row(vec![
            r.id.clone(),
            r.website.clone(),
            r.username.clone(),
            password.to_string(),
            r.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a single decrypted entry as a two-column table.
pub fn print_record(record: &CredentialRecord) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["ID", record.id.as_str()]);
    table.add_row(vec!["Website", record.website.as_str()]);
    table.add_row(vec!["Username", record.username.as_str()]);
    table.add_row(vec!["Password", record.password.as_str()]);
    table.add_row(vec!["Notes", record.notes.as_str()]);
    table.add_row(vec![
        "Created".to_string(),
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Updated".to_string(),
        record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);

    println!("{table}");
}
