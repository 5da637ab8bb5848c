//! # SoundVault Common Library
//!
//! Shared code for the SoundVault catalog service:
//! - Error and result types
//! - Configuration resolution (CLI, environment, TOML, compiled defaults)
//! - Database pool construction, schema creation and migrations
//! - Demo catalog seed data

pub mod config;
pub mod db;
pub mod error;

pub use config::{ServerConfig, TomlConfig};
pub use error::{Error, Result};
