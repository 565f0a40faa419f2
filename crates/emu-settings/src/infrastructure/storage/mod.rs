//! Storage infrastructure: settings file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML settings file from the platform-appropriate directory
//!   (or an explicit path).
//! - Writing changes back to disk after profile commands.
//! - Providing defaults when the file does not exist yet (first run).

pub mod config;
