//! Monitored location settings

use application::{InstanceId, MonitorConfig};
use domain::{GeoLocation, LeadTime};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One `[[instances]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Registry key; defaults to `name`
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Minutes ahead in which upcoming warnings count as relevant (default: 0)
    #[serde(default)]
    pub lead_time_minutes: i64,
}

impl InstanceConfig {
    pub(super) fn to_monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "instance name must not be empty".to_string(),
            ));
        }

        let invalid = |what: String| ConfigError::Validation(format!("instance '{name}': {what}"));

        let id = InstanceId::new(self.id.as_deref().unwrap_or(name).trim())
            .map_err(|e| invalid(e.to_string()))?;
        let location = GeoLocation::new(self.latitude, self.longitude)
            .map_err(|e| invalid(e.to_string()))?;
        let lead_time =
            LeadTime::from_minutes(self.lead_time_minutes).map_err(|e| invalid(e.to_string()))?;

        Ok(MonitorConfig::new(id, name, location, lead_time))
    }
}
