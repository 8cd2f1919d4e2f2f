//! Warnings API settings

use std::time::Duration;

use integration_geosphere::GeosphereConfig;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Settings of the `[geosphere]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeosphereSettings {
    /// Warnings API base URL (default: <https://warnungen.zamg.at/wsapp/api>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound for one whole fetch cycle in seconds (default: 20)
    #[serde(default = "default_cycle_timeout")]
    pub cycle_timeout_secs: u64,

    /// Language of free-text fields (default: "de")
    #[serde(default = "default_language")]
    pub language: String,

    /// Seconds between fetch cycles (default: 300)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_base_url() -> String {
    GeosphereConfig::default().base_url
}

const fn default_timeout() -> u64 {
    15
}

const fn default_cycle_timeout() -> u64 {
    20
}

fn default_language() -> String {
    "de".to_string()
}

const fn default_poll_interval() -> u64 {
    300
}

impl Default for GeosphereSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            cycle_timeout_secs: default_cycle_timeout(),
            language: default_language(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl GeosphereSettings {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "geosphere.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "geosphere.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.cycle_timeout_secs < self.timeout_secs {
            return Err(ConfigError::Validation(format!(
                "geosphere.cycle_timeout_secs ({}) must not be below timeout_secs ({})",
                self.cycle_timeout_secs, self.timeout_secs
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "geosphere.poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "geosphere.language must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client configuration
    #[must_use]
    pub fn client_config(&self) -> GeosphereConfig {
        GeosphereConfig {
            base_url: self.base_url.trim().to_string(),
            timeout_secs: self.timeout_secs,
            language: self.language.trim().to_string(),
        }
    }

    /// Time between cycles
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Hard bound for one cycle
    #[must_use]
    pub const fn cycle_timeout(&self) -> Duration {
        Duration::from_secs(self.cycle_timeout_secs)
    }
}
