//! Port Adapters
//!
//! This module provides adapter implementations for the invoice domain's
//! ports, connecting them to remote HTTP APIs.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements a domain port trait
//! - Translates between the remote JSON shapes and domain models
//! - Uses `JsonClient` for transport and error mapping
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_http::adapters::{HighLevelConfig, HighLevelInvoiceGateway};
//! use domain_invoice::InvoiceGatewayPort;
//!
//! let gateway = HighLevelInvoiceGateway::new(HighLevelConfig::new(api_key, location_id))?;
//! let invoice = gateway.find_by_number("000123").await?;
//! ```

pub mod api;
pub mod highlevel;
pub mod sheets;

pub use api::{ApiInvoiceGateway, ApiSheetLogger};
pub use highlevel::{HighLevelConfig, HighLevelInvoiceGateway, HIGHLEVEL_API_VERSION, HIGHLEVEL_BASE_URL};
pub use sheets::{GoogleSheetsLogger, SheetsConfig, APPEND_SUCCESS_MESSAGE, SHEETS_BASE_URL};
