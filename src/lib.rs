pub mod auth;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod generator;
pub mod logging;
pub mod persist;
pub mod vault;
