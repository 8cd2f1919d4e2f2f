//! Application configuration
//!
//! Layered as defaults, then an optional `config.toml`, then environment
//! variables prefixed with `GEOSPHERE_WARNINGS_` (nested keys separated by
//! `__`, e.g. `GEOSPHERE_WARNINGS_GEOSPHERE__TIMEOUT_SECS=10`).
//!
//! - `geosphere`: API endpoint, timeouts and poll interval
//! - `instances`: monitored locations

mod geosphere;
mod instances;

use std::path::Path;
use std::time::Duration;

use application::MonitorConfig;
use integration_geosphere::GeosphereConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use geosphere::GeosphereSettings;
pub use instances::InstanceConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GEOSPHERE_WARNINGS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Warnings API settings
    #[serde(default)]
    pub geosphere: GeosphereSettings,

    /// Monitored locations
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Validated, ready-to-use settings
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// HTTP client settings
    pub client: GeosphereConfig,
    /// Time between fetch cycles
    pub poll_interval: Duration,
    /// One entry per configured instance
    pub monitors: Vec<MonitorConfig>,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    /// in the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            config::File::with_name("config").required(false),
            Self::environment(),
        )
    }

    /// Load configuration from an explicit file plus environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a source cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true), Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn build(
        file: config::File<config::FileSourceFile, config::FileFormat>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;
        let app: Self = config.try_deserialize()?;

        debug!(instances = app.instances.len(), "Configuration loaded");
        Ok(app)
    }

    /// Validate all values and convert them into typed settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending value.
    pub fn validate(&self) -> Result<MonitorSettings, ConfigError> {
        self.geosphere.validate()?;

        if self.instances.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[instances]] entry is required".to_string(),
            ));
        }

        let cycle_timeout = self.geosphere.cycle_timeout();
        let mut monitors: Vec<MonitorConfig> = Vec::with_capacity(self.instances.len());
        for instance in &self.instances {
            let monitor = instance.to_monitor_config()?.with_cycle_timeout(cycle_timeout);
            if monitors.iter().any(|m| m.id == monitor.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate instance id '{}'",
                    monitor.id
                )));
            }
            monitors.push(monitor);
        }

        Ok(MonitorSettings {
            client: self.geosphere.client_config(),
            poll_interval: self.geosphere.poll_interval(),
            monitors,
        })
    }
}
