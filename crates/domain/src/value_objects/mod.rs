//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod lead_time;
mod warning_category;
mod warning_severity;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use lead_time::LeadTime;
pub use warning_category::WarningCategory;
pub use warning_severity::WarningSeverity;
