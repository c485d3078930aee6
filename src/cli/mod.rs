//! CLI interface for movescan
//!
//! Provides subcommands for:
//! - `scan`: build the reference table and scan the live feed
//! - `reference`: fetch and print the reference price table
//! - `config`: show the resolved configuration

mod reference;
mod scan;

pub use reference::ReferenceArgs;
pub use scan::ScanArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "movescan")]
#[command(about = "Real-time price movement scanner for the US equities universe")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the live feed for large price moves
    Scan(ScanArgs),
    /// Fetch and print the reference price table
    Reference(ReferenceArgs),
    /// Show the resolved configuration
    Config,
}
