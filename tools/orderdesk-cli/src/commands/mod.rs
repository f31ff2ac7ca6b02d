//! CLI command implementations.

pub mod config;
pub mod shipping;
pub mod stock;
pub mod submit;
pub mod track;

use clap::{Args, Subcommand};

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    /// SKUs to check.
    #[arg(required = true)]
    pub skus: Vec<String>,

    /// Concurrent lookups for several SKUs (default: from config).
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the track command.
#[derive(Args)]
pub struct TrackArgs {
    /// Order reference.
    pub reference: String,
}

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Path to a JSON order file.
    pub file: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
