//! Application layer - Use cases and orchestration
//!
//! Runs warning fetch cycles through ports, derives the host-facing
//! projections and keeps track of configured monitor instances.

pub mod error;
pub mod ports;
pub mod projections;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use projections::{ATTRIBUTION, AlertProjection, SummaryProjection};
pub use services::*;
