//! GeoSphere warnings CLI
//!
//! Argument definitions, output rendering and the stdout sink used by the
//! `geosphere-warnings` binary.

pub mod cli;
pub mod output;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use output::{OutputFormat, StdoutWarningSink, render_update};
