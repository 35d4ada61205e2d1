//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use crate::models::{Coordinate, UnitSystem};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "WEATHERDASH_CONFIG";

/// Root configuration structure for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Device geolocation settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Simulated network latency
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Device geolocation settings.
///
/// With `enabled = false` the dashboard behaves as if the device had no
/// geolocation capability at all. When enabled, the configured position is
/// reported as the device position; leaving it unset makes every lookup
/// fail with "position unavailable".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_geolocation_enabled")]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Artificial delays applied before a report is generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Delay for searches, in milliseconds
    #[serde(default = "default_search_delay")]
    pub search_delay_ms: u64,
    /// Delay for reports of the resolved device position, in milliseconds
    #[serde(default = "default_locate_delay")]
    pub locate_delay_ms: u64,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Unit system selected at startup
    #[serde(default)]
    pub unit: UnitSystem,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, compact or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_geolocation_enabled() -> bool {
    true
}

fn default_search_delay() -> u64 {
    1000
}

fn default_locate_delay() -> u64 {
    1500
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

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_geolocation_enabled(),
            latitude: None,
            longitude: None,
        }
    }
}

impl GeolocationConfig {
    /// Configured device position, if both components are set
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            search_delay_ms: default_search_delay(),
            locate_delay_ms: default_locate_delay(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            unit: UnitSystem::Metric,
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

impl DashboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides such as WEATHERDASH_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("WEATHERDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherdash").join("config.toml"))
    }

    /// Address the web server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_server()?;
        self.validate_geolocation()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(DashboardError::config("Server host cannot be empty").into());
        }
        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }
        if self.simulation.search_delay_ms > 60_000 || self.simulation.locate_delay_ms > 60_000 {
            return Err(DashboardError::config(
                "Simulated delays cannot exceed 60000 ms"
            ).into());
        }
        Ok(())
    }

    fn validate_geolocation(&self) -> Result<()> {
        let geo = &self.geolocation;
        match (geo.latitude, geo.longitude) {
            (Some(_), None) | (None, Some(_)) => Err(DashboardError::config(
                "Geolocation latitude and longitude must be set together"
            ).into()),
            (Some(latitude), Some(longitude)) if !Coordinate::new(latitude, longitude).is_valid() => {
                Err(DashboardError::config(format!(
                    "Geolocation position ({latitude}, {longitude}) is out of range"
                )).into())
            }
            _ => Ok(()),
        }
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "compact", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.simulation.search_delay_ms, 1000);
        assert_eq!(config.simulation.locate_delay_ms, 1500);
        assert_eq!(config.defaults.unit, UnitSystem::Metric);
        assert_eq!(config.logging.level, "info");
        assert!(config.geolocation.enabled);
        assert!(config.geolocation.position().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[geolocation]
latitude = 48.8566
longitude = 2.3522

[simulation]
search_delay_ms = 0

[defaults]
unit = "imperial"
"#
        )
        .unwrap();

        let config = DashboardConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.simulation.search_delay_ms, 0);
        assert_eq!(config.simulation.locate_delay_ms, 1500);
        assert_eq!(config.defaults.unit, UnitSystem::Imperial);
        assert_eq!(
            config.geolocation.position(),
            Some(Coordinate::new(48.8566, 2.3522))
        );
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_port_zero() {
        let mut config = DashboardConfig::default();
        config.server.port = 0;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("port cannot be 0"));
    }

    #[test]
    fn test_config_validation_lone_latitude() {
        let mut config = DashboardConfig::default();
        config.geolocation.latitude = Some(10.0);
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("set together"));
    }

    #[test]
    fn test_config_validation_out_of_range_position() {
        let mut config = DashboardConfig::default();
        config.geolocation.latitude = Some(123.0);
        config.geolocation.longitude = Some(0.0);
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherdash"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }

    #[test]
    fn test_bind_address() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
