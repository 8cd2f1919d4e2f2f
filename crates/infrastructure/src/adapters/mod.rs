//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod channel_sink;
mod geosphere_adapter;

pub use channel_sink::ChannelWarningSink;
pub use geosphere_adapter::GeosphereAdapter;
