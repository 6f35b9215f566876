//! Settings module for rulesync
//!
//! Holds the configuration table: built-in defaults, optionally replaced
//! by a TOML file.

pub mod config;

pub use config::SyncSettings;
