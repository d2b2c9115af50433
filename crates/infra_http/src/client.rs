//! JSON-over-HTTP client
//!
//! A thin wrapper over `reqwest::Client` bound to one remote system. It
//! applies the system's authentication and version headers to every call,
//! reads the answer as JSON, and turns non-success statuses into
//! `HttpError::Status` with the body intact.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use core_kernel::{ExternalAuthConfig, ExternalSystemConfig};

use crate::error::HttpError;

/// Client for one remote JSON API
#[derive(Debug, Clone)]
pub struct JsonClient {
    http: reqwest::Client,
    config: ExternalSystemConfig,
}

impl JsonClient {
    /// Builds a client for the given system
    ///
    /// No timeout is set unless the configuration asks for one.
    pub fn new(config: ExternalSystemConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ExternalSystemConfig {
        &self.config
    }

    /// GETs `path` and decodes the answer
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HttpError> {
        let value = self.send(self.request(Method::GET, path).query(query)).await?;
        decode(path, value)
    }

    /// POSTs a JSON body to `path` and decodes the answer
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, HttpError> {
        let value = self
            .send(self.request(Method::POST, path).query(query).json(body))
            .await?;
        decode(path, value)
    }

    /// POSTs a JSON body and returns the status with the raw answer
    ///
    /// Non-success statuses are returned rather than raised, for callers
    /// that relay the remote answer as is.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<(u16, Value), HttpError> {
        let response = self
            .request(Method::POST, path)
            .query(query)
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, read_body(response).await?))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        debug!(%method, %url, "Outgoing request");

        let mut request = self.http.request(method, url);
        if let ExternalAuthConfig::BearerToken { token } = &self.config.auth {
            request = request.bearer_auth(token);
        }
        if let Some(version) = &self.config.api_version {
            request = request.header("Version", version);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, HttpError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = read_body(response).await?;

        if status.is_success() {
            Ok(body)
        } else {
            warn!(status = status.as_u16(), %url, "Remote call failed");
            Err(HttpError::Status { status: status.as_u16(), body })
        }
    }
}

/// Reads a response body as JSON; an empty body reads as `null`
async fn read_body(response: Response) -> Result<Value, HttpError> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| HttpError::decode("response body", e))
}

fn decode<T: DeserializeOwned>(context: &str, value: Value) -> Result<T, HttpError> {
    serde_json::from_value(value).map_err(|e| HttpError::decode(context, e))
}
