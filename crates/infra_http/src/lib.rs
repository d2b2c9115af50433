//! Infrastructure HTTP Layer
//!
//! This crate connects the invoice domain's ports to the remote systems
//! that back them, using `reqwest`.
//!
//! # Adapters
//!
//! - **Direct**: `GoogleSheetsLogger` and `HighLevelInvoiceGateway` hold the
//!   upstream credentials and call Google Sheets and HighLevel themselves.
//!   The API server uses these.
//! - **Through the web API**: `ApiSheetLogger` and `ApiInvoiceGateway` call
//!   the server's `/api/*` endpoints, for front-desk clients that must not
//!   hold credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{ApiInvoiceGateway, ApiSheetLogger};
//! use core_kernel::ExternalSystemConfig;
//!
//! let api = ExternalSystemConfig::new("http://localhost:3000");
//! let logger = ApiSheetLogger::new(api.clone())?;
//! let gateway = ApiInvoiceGateway::new(api)?;
//! let session = Session::new(Arc::new(logger), Arc::new(gateway));
//! ```

pub mod client;
pub mod error;
pub mod adapters;

pub use client::JsonClient;
pub use error::HttpError;
pub use adapters::{
    ApiInvoiceGateway, ApiSheetLogger, GoogleSheetsLogger, HighLevelConfig,
    HighLevelInvoiceGateway, SheetsConfig,
};
