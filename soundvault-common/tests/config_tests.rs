//! Configuration resolution tests
//!
//! Tests that manipulate SOUNDVAULT_* variables are marked with #[serial]
//! so they never run in parallel with each other.

use serial_test::serial;
use soundvault_common::config::{load_toml_config, ConfigOverrides, ServerConfig, DEFAULT_PORT};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const VARS: &[&str] = &[
    "SOUNDVAULT_HOST",
    "SOUNDVAULT_PORT",
    "SOUNDVAULT_DB_PATH",
    "SOUNDVAULT_MAX_CONNECTIONS",
    "SOUNDVAULT_ACQUIRE_TIMEOUT_SECS",
    "SOUNDVAULT_DEGRADED_READS",
    "SOUNDVAULT_CORS_ORIGIN",
    "SOUNDVAULT_LOG_LEVEL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn write_toml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let file = write_toml("port = 7000\nhost = \"0.0.0.0\"\n");
    env::set_var("SOUNDVAULT_PORT", "7100");

    let config = ServerConfig::resolve(ConfigOverrides::default(), Some(file.path())).unwrap();

    assert_eq!(config.port, 7100);
    assert_eq!(config.host, "0.0.0.0");
    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("SOUNDVAULT_DB_PATH", "/tmp/from-env.db");
    env::set_var("SOUNDVAULT_DEGRADED_READS", "true");

    let cli = ConfigOverrides {
        database_path: Some(PathBuf::from("/tmp/from-cli.db")),
        ..Default::default()
    };
    let file = write_toml("");
    let config = ServerConfig::resolve(cli, Some(file.path())).unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/from-cli.db"));
    assert!(config.degraded_reads);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_config_error() {
    clear_env();
    env::set_var("SOUNDVAULT_PORT", "not-a-port");

    let file = write_toml("");
    let result = ServerConfig::resolve(ConfigOverrides::default(), Some(file.path()));

    assert!(result.is_err());
    clear_env();
}

#[test]
#[serial]
fn test_empty_toml_uses_defaults() {
    clear_env();
    let file = write_toml("");

    let config = ServerConfig::resolve(ConfigOverrides::default(), Some(file.path())).unwrap();

    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.degraded_reads);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_explicit_missing_file_is_error() {
    let result = load_toml_config(Some(&PathBuf::from("/nonexistent/soundvault.toml")));
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_is_error() {
    let file = write_toml("port = \"eighty\"");
    let result = load_toml_config(Some(file.path()));
    assert!(result.is_err());
}
