//! TOML-based service configuration.

use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::reducer::{ELECTRICITY_SYSTEM, Reducer, ZeroDemandPolicy};

/// Top-level service configuration parsed from TOML.
///
/// Every section has defaults, so an empty file (or no file at all, see
/// [`ServiceConfig::default`]) gives a working local setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backing data file.
    #[serde(default)]
    pub data: DataConfig,
    /// Demand reduction rule parameters.
    #[serde(default)]
    pub reduction: ReductionConfig,
    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface address to bind (IPv4 or IPv6 literal).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Backing data file settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Path of the JSON document loaded at startup.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/json_database.json"),
        }
    }
}

/// Demand reduction rule parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReductionConfig {
    /// Energy system whose demand is offset by asset output.
    pub electricity_system: String,
    /// Behaviour when reduced total demand is zero.
    pub zero_demand: ZeroDemandPolicy,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            electricity_system: ELECTRICITY_SYSTEM.to_string(),
            zero_demand: ZeroDemandPolicy::default(),
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.host"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.host.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.host".into(),
                message: format!("must be an IP address, got \"{}\"", self.server.host),
            });
        }
        if self.data.path.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "data.path".into(),
                message: "must not be empty".into(),
            });
        }
        if self.reduction.electricity_system.trim().is_empty() {
            errors.push(ConfigError {
                field: "reduction.electricity_system".into(),
                message: "must not be empty".into(),
            });
        }
        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `server.host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| ConfigError {
            field: "server.host".into(),
            message: format!("{e}"),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Builds the reducer described by the `[reduction]` section.
    pub fn reducer(&self) -> Reducer {
        Reducer::new(
            self.reduction.electricity_system.clone(),
            self.reduction.zero_demand,
        )
    }
}
