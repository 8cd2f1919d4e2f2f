//! Domain entities - Warnings and the per-cycle warning snapshot

mod warning_set;
mod weather_warning;

pub use warning_set::{WarningSet, highest_severity};
pub use weather_warning::Warning;
