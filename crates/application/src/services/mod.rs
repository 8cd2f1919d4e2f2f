//! Application services - Use case implementations

mod instance_registry;
mod warning_service;

pub use instance_registry::InstanceRegistry;
pub use warning_service::{
    DegradedReason, FetchStatus, InstanceId, MonitorConfig, WarningService, WarningSnapshot,
};
