//! Front-Desk Invoice API - Server Binary
//!
//! This binary starts the HTTP API the front-desk calculator talks to.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin invoice-api
//!
//! # Run with environment variables
//! API_PORT=3000 API_HIGHLEVEL_API_KEY=... API_SPREADSHEET_ID=... cargo run --bin invoice-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 3000)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_HIGHLEVEL_API_KEY` - HighLevel private integration token
//! * `API_HIGHLEVEL_LOCATION_ID` - HighLevel location the invoices belong to
//! * `API_HIGHLEVEL_BASE_URL` - HighLevel API root (default: https://services.leadconnectorhq.com)
//! * `API_HIGHLEVEL_API_VERSION` - HighLevel `Version` header (default: 2021-07-28)
//! * `API_SPREADSHEET_ID` - Google spreadsheet receiving the weekly sheets
//! * `API_SHEETS_ACCESS_TOKEN` - OAuth access token for the Sheets API
//! * `API_SHEETS_BASE_URL` - Sheets API root (default: https://sheets.googleapis.com/v4)
//! * `API_TIMEOUT_SECS` - Upstream request timeout (default: none)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the upstream adapters,
/// and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        location_id = %config.highlevel_location_id,
        "Starting front-desk invoice API server"
    );

    let state = AppState::from_config(config.clone()).context("failed to set up upstream adapters")?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
