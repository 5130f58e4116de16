//! Tracing setup for the `passvault` binary.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `passvault=debug`).
pub const LOG_ENV: &str = "PASSVAULT_LOG";

/// Filter used when `PASSVAULT_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "passvault=warn";

/// Install a stderr fmt subscriber.  Safe to call more than once; later
/// calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
