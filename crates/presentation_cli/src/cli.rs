//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// GeoSphere Austria weather warnings monitor
#[derive(Debug, Parser)]
#[command(name = "geosphere-warnings")]
#[command(author, version, about = "Weather warnings from GeoSphere Austria", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "GEOSPHERE_WARNINGS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll all configured instances until interrupted
    Watch {
        /// Print updates as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Run one fetch cycle and print the result
    Check {
        /// Only check this instance id
        #[arg(short, long)]
        instance: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration, print the resolved instances and check
    /// that the warnings endpoint answers
    ValidateConfig,
}

/// Log filter for a `-v` count; `None` keeps the configured filter
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
