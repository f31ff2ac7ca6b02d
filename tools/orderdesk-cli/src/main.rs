//! orderdesk - Command line tool for the HePws order service.
//!
//! Commands:
//! - `orderdesk stock` - Check stock for one or more SKUs
//! - `orderdesk track` - Look up an order's status
//! - `orderdesk submit` - Submit an order from a JSON file
//! - `orderdesk shipping-methods` - List shipping methods
//! - `orderdesk config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use orderdesk_config::{telemetry, LogFormat};

use commands::{ConfigArgs, StockArgs, SubmitArgs, TrackArgs};

/// orderdesk - Query and submit orders against the HePws service
#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check stock for one or more SKUs
    Stock(StockArgs),

    /// Look up the status of an order
    Track(TrackArgs),

    /// Submit an order read from a JSON file
    Submit(SubmitArgs),

    /// List available shipping methods
    ShippingMethods,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "orderdesk=debug" } else { "warn" };
    // A second init only fails if a subscriber already exists.
    let _ = telemetry::init_with_filter(LogFormat::Human, filter);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Stock(args) => commands::stock::run(args, &ctx).await,
        Commands::Track(args) => commands::track::run(args, &ctx).await,
        Commands::Submit(args) => commands::submit::run(args, &ctx).await,
        Commands::ShippingMethods => commands::shipping::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
