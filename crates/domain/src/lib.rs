//! Domain layer for the GeoSphere warnings monitor
//!
//! Contains the warning model, its severity/category taxonomy and the
//! relevance rules applied to a fetched warning snapshot.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
