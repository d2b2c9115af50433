//! HTTP error types
//!
//! Errors raised while talking to a remote JSON API, and their translation
//! into the port errors the domain understands.

use serde_json::Value;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during HTTP calls
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never got an answer (DNS, refused connection, TLS, timeout)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote side answered with a non-success status
    #[error("Remote returned status {status}")]
    Status { status: u16, body: Value },

    /// The response body was not the shape we expected
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The adapter is missing a setting it needs
    #[error("Missing configuration: {0}")]
    Config(&'static str),
}

impl HttpError {
    /// Creates a decode error from a serde failure
    pub fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        HttpError::Decode(format!("{context}: {err}"))
    }

    /// Returns the HTTP status, if the remote side answered
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Converts HTTP errors to port errors
///
/// Non-success answers keep their status and raw body so that a proxy can
/// relay them unchanged.
impl From<HttpError> for PortError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, body } => PortError::upstream(status, body),
            HttpError::Transport(source) => PortError::Connection {
                message: source.to_string(),
                source: Some(Box::new(source)),
            },
            HttpError::Decode(message) => PortError::transformation(message),
            HttpError::Config(setting) => PortError::internal(format!("missing setting {setting}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_keeps_body_for_relay() {
        let err: PortError = HttpError::Status {
            status: 422,
            body: json!({ "message": "amount is invalid", "statusCode": 422 }),
        }
        .into();

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "amount is invalid");
        match err {
            PortError::Upstream { body, .. } => assert_eq!(body["statusCode"], json!(422)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_without_message_gets_generic_text() {
        let err: PortError = HttpError::Status { status: 502, body: Value::Null }.into();
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_decode_maps_to_transformation() {
        let err: PortError = HttpError::decode("invoice", "missing field `_id`").into();
        assert!(matches!(err, PortError::Transformation { .. }));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_upstream_404_counts_as_not_found() {
        let err: PortError = HttpError::Status { status: 404, body: json!({}) }.into();
        assert!(err.is_not_found());
    }
}
