//! Logging infrastructure
//!
//! Sets up the global `tracing` subscriber with console output in either
//! human-readable or JSON form.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
