//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the GeoSphere adapter, sinks, configuration loading, logging
//! setup and the poll scheduler.

pub mod adapters;
pub mod config;
pub mod scheduler;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigError, ENV_PREFIX, GeosphereSettings, InstanceConfig, MonitorSettings,
};
pub use scheduler::{PollerStats, WarningPoller};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
