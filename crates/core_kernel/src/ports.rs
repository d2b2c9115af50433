//! Ports and Adapters Infrastructure
//!
//! The calculator talks to two collaborators it does not own: the
//! spreadsheet logger and the invoicing platform. Each is reached through a
//! port trait defined in the domain crate; adapters implement those traits
//! either against the web API the front desk calls or against the upstream
//! service directly.
//!
//! ```text
//!         Calculator / Session
//!                  │
//!                  ▼
//!   SheetLoggerPort, InvoiceGatewayPort
//!         ▲                      ▲
//!         │                      │
//!   ┌─────┴──────┐      ┌────────┴────────┐
//!   │ /api/...   │      │ Google Sheets,  │
//!   │ web client │      │ HighLevel REST  │
//!   └────────────┘      └─────────────────┘
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Every adapter reports failures through this type so the workflow can
/// surface them uniformly as transient notifications.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("{entity_type} with {key} {id} not found.")]
    NotFound {
        entity_type: String,
        key: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote system answered with a non-success status
    ///
    /// `body` is the raw JSON the remote system returned, kept so that
    /// proxies can relay it unchanged.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    /// A data transformation error occurred
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(
        entity_type: impl Into<String>,
        key: impl Into<String>,
        id: impl fmt::Display,
    ) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            key: key.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Upstream error from a remote status and JSON body
    ///
    /// The message is taken from the body's `message` field when present.
    pub fn upstream(status: u16, body: serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        PortError::Upstream { status, message, body }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
            || matches!(self, PortError::Upstream { status: 404, .. })
    }

    /// Returns the HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PortError::NotFound { .. } => Some(404),
            PortError::Validation { .. } => Some(400),
            PortError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Marker trait for all domain ports
///
/// Port implementations are moved into spawned tasks, so they must be
/// thread-safe and `'static`.
pub trait DomainPort: Send + Sync + 'static {}

/// External system configuration for API-based adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSystemConfig {
    /// Base URL for the external system
    pub base_url: String,
    /// API version header value (e.g., "2021-07-28")
    pub api_version: Option<String>,
    /// Authentication configuration
    pub auth: ExternalAuthConfig,
    /// Request timeout; `None` waits for as long as the remote side takes
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ExternalSystemConfig {
    /// Creates an unauthenticated configuration for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: None,
            auth: ExternalAuthConfig::None,
            timeout_secs: None,
        }
    }

    /// Sets a bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = ExternalAuthConfig::BearerToken { token: token.into() };
        self
    }

    /// Sets the API version header value
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Joins a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Authentication configuration for external systems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExternalAuthConfig {
    /// No authentication required
    None,
    /// Bearer token authentication
    /// The token is never written out; a deserialized config without one
    /// carries an empty token.
    BearerToken {
        #[serde(skip_serializing, default)]
        token: String,
    },
}
