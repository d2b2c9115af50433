//! Google Sheets logger
//!
//! Records go to one spreadsheet, one sheet per week. The first record of a
//! week creates that week's sheet and writes the header row; every record
//! is then appended as a single row.
//!
//! Authentication is a pre-issued OAuth access token. Minting and renewing
//! that token is left to whoever deploys the server.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use core_kernel::{DomainPort, ExternalSystemConfig, PortError};
use domain_invoice::{SheetLoggerPort, SheetRecord, SHEET_HEADERS};

use crate::client::JsonClient;
use crate::error::HttpError;

/// Production API root
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Message returned after a successful append
pub const APPEND_SUCCESS_MESSAGE: &str = "Todo salio bien!";

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Google Sheets connection settings
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub access_token: String,
    pub timeout_secs: Option<u64>,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Sheet logger writing straight to a Google spreadsheet
#[derive(Debug, Clone)]
pub struct GoogleSheetsLogger {
    client: JsonClient,
    spreadsheet_id: String,
}

impl GoogleSheetsLogger {
    pub fn new(config: SheetsConfig) -> Result<Self, HttpError> {
        if config.spreadsheet_id.is_empty() {
            return Err(HttpError::Config("spreadsheet id"));
        }
        let system = ExternalSystemConfig {
            timeout_secs: config.timeout_secs,
            ..ExternalSystemConfig::new(config.base_url).with_bearer_token(config.access_token)
        };
        Ok(Self {
            client: JsonClient::new(system)?,
            spreadsheet_id: config.spreadsheet_id,
        })
    }

    async fn sheet_titles(&self) -> Result<Vec<String>, HttpError> {
        let path = format!("/spreadsheets/{}", self.spreadsheet_id);
        let spreadsheet: Spreadsheet = self
            .client
            .get(&path, &[("fields", "sheets.properties.title")])
            .await?;
        Ok(spreadsheet.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn add_sheet(&self, title: &str) -> Result<(), HttpError> {
        let path = format!("/spreadsheets/{}:batchUpdate", self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": 1, "columnCount": SHEET_HEADERS.len() }
                    }
                }
            }]
        });
        let _: Value = self.client.post(&path, &[], &body).await?;
        Ok(())
    }

    async fn append_row(&self, title: &str, row: Vec<Value>) -> Result<(), HttpError> {
        let path = format!("/spreadsheets/{}/values/{title}!A1:append", self.spreadsheet_id);
        let body = json!({ "values": [row] });
        let _: Value = self
            .client
            .post(&path, &[("valueInputOption", "USER_ENTERED")], &body)
            .await?;
        Ok(())
    }

    /// Creates this week's sheet with its header row when it is missing
    async fn ensure_sheet(&self, title: &str) -> Result<(), HttpError> {
        if self.sheet_titles().await?.iter().any(|t| t == title) {
            return Ok(());
        }

        info!(sheet = title, "Creating weekly sheet");
        self.add_sheet(title).await?;
        let headers = SHEET_HEADERS.iter().map(|h| Value::from(*h)).collect();
        self.append_row(title, headers).await
    }
}

impl DomainPort for GoogleSheetsLogger {}

#[async_trait]
impl SheetLoggerPort for GoogleSheetsLogger {
    #[instrument(skip(self, record), fields(client = %record.client_name))]
    async fn append(&self, record: &SheetRecord) -> Result<String, PortError> {
        let title = record.sheet_title(Utc::now());
        self.ensure_sheet(&title).await?;
        self.append_row(&title, record.to_row()).await?;

        info!(sheet = %title, "Record appended");
        Ok(APPEND_SUCCESS_MESSAGE.to_string())
    }
}
