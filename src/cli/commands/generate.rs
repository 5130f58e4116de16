//! `passvault generate` — print a random password.

use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::generator::generate_random_password;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(l) => l,
        None => Context::load(cli)?.settings.generated_password_length,
    };

    // Raw output only, so it can be piped.
    println!("{}", generate_random_password(length));
    Ok(())
}
