//! Configuration loading and resolution
//!
//! Every setting is resolved independently in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SOUNDVAULT_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Default HTTP bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;
/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
/// Default allowed CORS origin (the dashboard dev server)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Answer listing requests with an empty page when the store is unavailable
    pub degraded_reads: bool,
    pub cors_origin: String,
    pub log_level: String,
}

/// Optional per-field values from one configuration source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub degraded_reads: Option<bool>,
    pub cors_origin: Option<String>,
    pub log_level: Option<String>,
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk TOML configuration
///
/// ```toml
/// host = "0.0.0.0"
/// port = 5000
/// database_path = "/var/lib/soundvault/soundvault.db"
/// degraded_reads = false
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub degraded_reads: Option<bool>,
    pub cors_origin: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl From<TomlConfig> for ConfigOverrides {
    fn from(config: TomlConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            database_path: config.database_path,
            max_connections: config.max_connections,
            acquire_timeout_secs: config.acquire_timeout_secs,
            degraded_reads: config.degraded_reads,
            cors_origin: config.cors_origin,
            log_level: config.logging.level,
        }
    }
}

impl ConfigOverrides {
    /// Read overrides from `SOUNDVAULT_*` environment variables
    ///
    /// Unset variables are skipped; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_string("SOUNDVAULT_HOST"),
            port: env_parsed("SOUNDVAULT_PORT")?,
            database_path: env_string("SOUNDVAULT_DB_PATH").map(PathBuf::from),
            max_connections: env_parsed("SOUNDVAULT_MAX_CONNECTIONS")?,
            acquire_timeout_secs: env_parsed("SOUNDVAULT_ACQUIRE_TIMEOUT_SECS")?,
            degraded_reads: env_string("SOUNDVAULT_DEGRADED_READS")
                .map(|v| parse_bool("SOUNDVAULT_DEGRADED_READS", &v))
                .transpose()?,
            cors_origin: env_string("SOUNDVAULT_CORS_ORIGIN"),
            log_level: env_string("SOUNDVAULT_LOG_LEVEL"),
        })
    }

    /// Fill every unset field from `lower`
    pub fn or(self, lower: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.or(lower.host),
            port: self.port.or(lower.port),
            database_path: self.database_path.or(lower.database_path),
            max_connections: self.max_connections.or(lower.max_connections),
            acquire_timeout_secs: self.acquire_timeout_secs.or(lower.acquire_timeout_secs),
            degraded_reads: self.degraded_reads.or(lower.degraded_reads),
            cors_origin: self.cors_origin.or(lower.cors_origin),
            log_level: self.log_level.or(lower.log_level),
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from CLI values, environment, TOML file and defaults
    ///
    /// `config_file` is an explicitly requested TOML path; it must exist.
    /// Without it the platform default location is tried and silently
    /// skipped when absent.
    pub fn resolve(cli: ConfigOverrides, config_file: Option<&Path>) -> Result<Self> {
        let env = ConfigOverrides::from_env()?;
        let toml = load_toml_config(config_file)?;
        Ok(Self::from_layers(cli.or(env).or(toml.into())))
    }

    /// Apply compiled defaults to whatever the layers left unset
    pub fn from_layers(layers: ConfigOverrides) -> Self {
        Self {
            host: layers.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: layers.port.unwrap_or(DEFAULT_PORT),
            database_path: layers.database_path.unwrap_or_else(default_database_path),
            max_connections: layers.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS).max(1),
            acquire_timeout_secs: layers
                .acquire_timeout_secs
                .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            degraded_reads: layers.degraded_reads.unwrap_or(false),
            cors_origin: layers
                .cors_origin
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            log_level: layers
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// `host:port` string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_layers(ConfigOverrides::default())
    }
}

/// Load the TOML config file
///
/// Returns an empty config when no explicit path is given and the default
/// file does not exist.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using environment and defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Platform config file location (`<config dir>/soundvault/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("soundvault").join("config.toml"))
}

/// Platform database location (`<data dir>/soundvault/soundvault.db`)
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("soundvault"))
        .unwrap_or_else(|| PathBuf::from("./soundvault_data"))
        .join("soundvault.db")
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: FromStr>(name: &str) -> Result<Option<T>> {
    env_string(name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, v)))
        })
        .transpose()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be a boolean, got: {}",
            name, value
        ))),
    }
}
