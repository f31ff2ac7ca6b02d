//! orderdesk-server - HTTP front end for the HePws order service.
//!
//! Endpoints:
//! - `POST /?action=<name>` - Run an action with a JSON body
//! - `POST /api?action=<name>` - Same as above

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use orderdesk_client::ApiClient;
use orderdesk_core::Credentials;
use orderdesk_server::{router, telemetry, AppState, ServerConfig};
use tokio::net::TcpListener;

/// Serve the order-management API
#[derive(Parser)]
#[command(name = "orderdesk-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ServerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    telemetry::init(config.log_format).context("Failed to initialise logging")?;

    let client = ApiClient::connect(config.transport_config(), Credentials::from_env())
        .context("Failed to build API client")?;
    if !client.has_credentials() {
        tracing::warn!(
            "HONEY_API_ACCOUNT or HONEY_API_PASSWORD is not set; remote calls will use empty credentials"
        );
    }
    let app = router(AppState::new(Arc::new(client), config.bulk_concurrency));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        endpoint = %config.api.endpoint,
        bulk_concurrency = config.bulk_concurrency,
        "orderdesk-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("orderdesk-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
