//! Configuration: `.passvault.toml` settings and resolved file paths.

pub mod settings;

pub use settings::{Settings, VaultPaths};
