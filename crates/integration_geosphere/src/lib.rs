//! GeoSphere Austria warnings integration
//!
//! Client for the public GeoSphere (formerly ZAMG) warnings API
//! (<https://warnungen.zamg.at>). Fetches the warnings issued for a
//! coordinate and maps them onto the domain warning model. No API key required.

pub mod client;
mod models;

pub use client::{GeosphereClient, GeosphereConfig, GeosphereError, WarningsClient};
pub use models::{ParsedPayload, RecordError, parse_payload};
