use serde::{Deserialize, Serialize};
use std::path::Path;

use super::database::DatabaseConfig;
use super::dns_query::DnsQueryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::zones::ZonesConfig;

const DEFAULT_CONFIG_PATH: &str = "bell-dns.toml";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub zones: ZonesConfig,

    #[serde(default)]
    pub dns_query: DnsQueryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub zones_directory: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path`, or `bell-dns.toml` when present, or defaults.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(dir) = overrides.zones_directory {
            self.zones.directory = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database.path cannot be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.zones.directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "zones.directory cannot be empty".to_string(),
            ));
        }
        if self.zones.file_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "zones.file_suffix cannot be empty".to_string(),
            ));
        }
        if self.zones.max_concurrent == 0 || self.dns_query.max_concurrent == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.zones.batch_size == 0 || self.dns_query.batch_size == 0 {
            return Err(ConfigError::Validation(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.dns_query.dns_servers.is_empty() {
            return Err(ConfigError::Validation(
                "dns_query.dns_servers must list at least one resolver".to_string(),
            ));
        }
        if self.dns_query.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "dns_query.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.dns_query.query_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "dns_query.query_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(self.dns_query.retry_multiplier >= 1.0) {
            return Err(ConfigError::Validation(
                "dns_query.retry_multiplier must be >= 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dns_query.retry_jitter) {
            return Err(ConfigError::Validation(
                "dns_query.retry_jitter must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
