//! Configuration loading and resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or malformed TOML file is never fatal: it is logged and the
//! remaining tiers are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the TOML config file
pub const ENV_CONFIG: &str = "FYYUR_CONFIG";
/// Environment variable for the bind host
pub const ENV_HOST: &str = "FYYUR_HOST";
/// Environment variable for the listen port
pub const ENV_PORT: &str = "FYYUR_PORT";
/// Environment variable for the SQLite database path
pub const ENV_DATABASE: &str = "FYYUR_DATABASE";

/// Compiled default listen port
pub const DEFAULT_PORT: u16 = 5000;
/// Compiled default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Compiled default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the optional `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Load the config file if one exists, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve every setting across the four tiers
    pub fn resolve(cli: CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let host = cli
            .host
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw))
                })?,
                Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let database_path = cli
            .database
            .or_else(|| std::env::var(ENV_DATABASE).ok().map(PathBuf::from))
            .or_else(|| toml_config.database_path.clone())
            .unwrap_or_else(default_database_path);

        let log_level = toml_config
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            host,
            port,
            database_path,
            log_level,
        })
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the config file: explicit path, then `FYYUR_CONFIG`, then the
/// per-user config directory
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join("fyyur.db")
}
