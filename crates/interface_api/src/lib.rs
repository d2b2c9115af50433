//! HTTP API Layer
//!
//! This crate provides the REST API behind the front-desk invoice
//! calculator using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Sheet logging, the invoicing platform proxy, fee calculation
//! - **Middleware**: Request logging, tracing, CORS
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses, upstream errors relayed as is
//!
//! # Routes
//!
//! | Method   | Path               | Purpose                                   |
//! |----------|--------------------|-------------------------------------------|
//! | GET      | `/health`          | Liveness                                  |
//! | POST     | `/api/sendToSheet` | Append a confirmed invoice to the sheet   |
//! | GET      | `/api/highlevel`   | Find an invoice by number or id           |
//! | POST     | `/api/highlevel`   | Record a payment against an invoice       |
//! | POST     | `/api/calculate`   | Compute totals for typed amounts          |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_invoice::{InvoiceGatewayPort, SheetLoggerPort};
use infra_http::{GoogleSheetsLogger, HighLevelInvoiceGateway, HttpError};

use crate::config::ApiConfig;
use crate::middleware::request_logging_middleware;
use crate::handlers::{calculate, health, highlevel, sheet};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sheet_logger: Arc<dyn SheetLoggerPort>,
    pub invoice_gateway: Arc<dyn InvoiceGatewayPort>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        sheet_logger: Arc<dyn SheetLoggerPort>,
        invoice_gateway: Arc<dyn InvoiceGatewayPort>,
        config: ApiConfig,
    ) -> Self {
        Self { sheet_logger, invoice_gateway, config }
    }

    /// Wires the Google Sheets and HighLevel adapters from configuration
    pub fn from_config(config: ApiConfig) -> Result<Self, HttpError> {
        let sheet_logger = GoogleSheetsLogger::new(config.sheets())?;
        let invoice_gateway = HighLevelInvoiceGateway::new(config.highlevel())?;
        Ok(Self::new(Arc::new(sheet_logger), Arc::new(invoice_gateway), config))
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Ports and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    let api_routes = Router::new()
        .route(
            "/sendToSheet",
            post(sheet::send_to_sheet).fallback(sheet::method_not_allowed),
        )
        .route(
            "/highlevel",
            get(highlevel::get_invoice)
                .post(highlevel::record_payment)
                .fallback(highlevel::method_not_allowed),
        )
        .route("/calculate", post(calculate::calculate));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(axum_middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
