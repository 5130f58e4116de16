//! Vault module — the encrypted credential collection.
//!
//! This module provides:
//! - The `CredentialRecord` type and id generation (`record`)
//! - The JSON records file with atomic writes and optional locking (`format`)
//! - High-level `Vault` for add/get/update/delete/search (`store`)

pub mod format;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use format::RecordFile;
pub use record::CredentialRecord;
pub use store::Vault;
