//! Configuration management for the climate API
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before the server starts.

use crate::ClimateApiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Station whose temperature observations back `/tobs` and `/temp`
pub const DEFAULT_STATION: &str = "USC00519281";

/// Root configuration structure for the climate API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateApiConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Observation database settings
    pub database: DatabaseConfig,
    /// Query parameters fixed by the deployment
    pub query: QueryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Observation database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file holding the `measurement` and `station` tables
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// Query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Station identifier used by the temperature endpoints
    #[serde(default = "default_station")]
    pub station: String,
    /// Length of the trailing window in days
    #[serde(default = "default_trailing_days")]
    pub trailing_days: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/hawaii.sqlite")
}

fn default_station() -> String {
    DEFAULT_STATION.to_string()
}

fn default_trailing_days() -> u32 {
    365
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            station: default_station(),
            trailing_days: default_trailing_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClimateApiConfig {
    /// Load configuration from `config_path`, or the default location when `None`,
    /// overlaid by environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            tracing::debug!("Reading configuration from {}", config_file.display());
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // CLIMATE_API_SERVER__PORT=8080 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("CLIMATE_API")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateApiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("climate-api").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.database.path.as_os_str().is_empty() {
            self.database.path = default_database_path();
        }
        if self.query.station.is_empty() {
            self.query.station = default_station();
        }
        if self.query.trailing_days == 0 {
            self.query.trailing_days = default_trailing_days();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ClimateApiError::config("Server port must be non-zero").into());
        }

        if self.query.trailing_days == 0 || self.query.trailing_days > 3660 {
            return Err(ClimateApiError::config(
                "Trailing window must be between 1 and 3660 days",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimateApiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClimateApiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(ClimateApiError::config("Database path cannot be empty").into());
        }

        if self.query.station.trim().is_empty() {
            return Err(ClimateApiError::config("Station identifier cannot be blank").into());
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
