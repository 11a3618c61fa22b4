//! Demo API with request/response logging.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌──────────────────────────────────────────────┐
//!     ─────────────────▶│  http/server  ──▶  middleware/request_logger │
//!                       │   (router,          (time, snapshot, emit)   │
//!                       │    limits)              │                    │
//!                       │                         ▼                    │
//!                       │                     handler                  │
//!     Client Response   │                         │                    │
//!     ◀─────────────────│◀── unchanged response ──┘                    │
//!                       └──────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                       logging/formatter ──▶ logging/sink (tracing)
//! ```
//!
//! One structured record is emitted per API invocation, with the fields
//! selected by the configured verbosity level.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_logger::config::{load_config, AppConfig};
use http_logger::HttpServer;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "http-logger", about = "Demo API with request/response logging")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_logger=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        logger_enabled = config.logger.enabled,
        log_level = ?config.logger.log_level,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
