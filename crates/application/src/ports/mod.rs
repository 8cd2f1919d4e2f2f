//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod warning_sink_port;
mod warnings_port;

#[cfg(test)]
pub use warning_sink_port::MockWarningSinkPort;
pub use warning_sink_port::{WarningSinkPort, WarningUpdate};
#[cfg(test)]
pub use warnings_port::MockWarningsPort;
pub use warnings_port::WarningsPort;
