//! API configuration

use serde::Deserialize;

use infra_http::adapters::{HIGHLEVEL_API_VERSION, HIGHLEVEL_BASE_URL, SHEETS_BASE_URL};
use infra_http::{HighLevelConfig, SheetsConfig};

/// API configuration
///
/// Every field can be set through an `API_`-prefixed environment variable,
/// e.g. `API_HIGHLEVEL_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// HighLevel API root
    pub highlevel_base_url: String,
    /// HighLevel private integration token
    pub highlevel_api_key: String,
    /// HighLevel location the invoices belong to
    pub highlevel_location_id: String,
    /// Value of HighLevel's `Version` header
    pub highlevel_api_version: String,
    /// Google Sheets API root
    pub sheets_base_url: String,
    /// Spreadsheet that receives the weekly sheets
    pub spreadsheet_id: String,
    /// OAuth access token for the Sheets API
    pub sheets_access_token: String,
    /// Upstream request timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            highlevel_base_url: HIGHLEVEL_BASE_URL.to_string(),
            highlevel_api_key: String::new(),
            highlevel_location_id: String::new(),
            highlevel_api_version: HIGHLEVEL_API_VERSION.to_string(),
            sheets_base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: String::new(),
            sheets_access_token: String::new(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the HighLevel adapter
    pub fn highlevel(&self) -> HighLevelConfig {
        HighLevelConfig {
            base_url: self.highlevel_base_url.clone(),
            api_key: self.highlevel_api_key.clone(),
            api_version: self.highlevel_api_version.clone(),
            location_id: self.highlevel_location_id.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Settings for the Google Sheets adapter
    pub fn sheets(&self) -> SheetsConfig {
        SheetsConfig {
            base_url: self.sheets_base_url.clone(),
            spreadsheet_id: self.spreadsheet_id.clone(),
            access_token: self.sheets_access_token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
