//! Audit BFF binary.
//!
//! A backend-for-frontend aggregator built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//! front-end request
//!     → http (Axum server, correlation-ID extraction)
//!     → services (validation, audit fan-out)
//!     → clients (identity / case-id mapper / progression / Fabric)
//!     → JSON response or uniform error envelope
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audit_bff::config::{load_config, BffConfig};
use audit_bff::http::HttpServer;

#[derive(Parser)]
#[command(name = "audit-bff")]
#[command(about = "Backend-for-frontend aggregator for the audit front-end", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audit_bff=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("audit-bff v{} starting", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BffConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        cqrs_base_url = %config.cqrs.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        downstream_timeout_secs = config.timeouts.downstream_secs,
        pipeline_configured = config.fabric.pipeline.is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
