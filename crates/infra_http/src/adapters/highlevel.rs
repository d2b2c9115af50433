//! HighLevel invoicing adapter
//!
//! Talks to the HighLevel (LeadConnector) REST API directly. Every call is
//! scoped to one location through the `altId`/`altType` parameters, and
//! every request carries the API version header.
//!
//! HighLevel has no lookup by invoice number, so `find_by_number` lists
//! the location's invoices and picks the match. Only the match is decoded
//! as an `ExternalInvoice`; the rest of the list is never inspected beyond
//! its `invoiceNumber`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use core_kernel::{DomainPort, ExternalSystemConfig, PortError};
use domain_invoice::{ExternalInvoice, InvoiceGatewayPort, PaymentReceipt, RecordPaymentRequest};

use crate::client::JsonClient;
use crate::error::HttpError;

/// Production API root
pub const HIGHLEVEL_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// API version sent in the `Version` header
pub const HIGHLEVEL_API_VERSION: &str = "2021-07-28";

const ALT_TYPE: &str = "location";
const LIST_LIMIT: &str = "99999";

#[derive(Debug, Deserialize)]
struct InvoiceList {
    #[serde(default)]
    invoices: Vec<Value>,
}

impl InvoiceList {
    /// Takes the listed invoice carrying `invoice_number`, undecoded
    fn take_by_number(self, invoice_number: &str) -> Option<Value> {
        self.invoices.into_iter().find(|invoice| {
            invoice.get("invoiceNumber").and_then(Value::as_str) == Some(invoice_number)
        })
    }
}

/// HighLevel connection settings
#[derive(Debug, Clone)]
pub struct HighLevelConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_version: String,
    pub location_id: String,
    pub timeout_secs: Option<u64>,
}

impl HighLevelConfig {
    pub fn new(api_key: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            base_url: HIGHLEVEL_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_version: HIGHLEVEL_API_VERSION.to_string(),
            location_id: location_id.into(),
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn system(&self) -> ExternalSystemConfig {
        ExternalSystemConfig {
            timeout_secs: self.timeout_secs,
            ..ExternalSystemConfig::new(&self.base_url)
                .with_bearer_token(&self.api_key)
                .with_api_version(&self.api_version)
        }
    }
}

/// Invoice gateway backed by the HighLevel API
#[derive(Debug, Clone)]
pub struct HighLevelInvoiceGateway {
    client: JsonClient,
    location_id: String,
}

impl HighLevelInvoiceGateway {
    pub fn new(config: HighLevelConfig) -> Result<Self, HttpError> {
        if config.location_id.is_empty() {
            return Err(HttpError::Config("HighLevel location id"));
        }
        Ok(Self {
            client: JsonClient::new(config.system())?,
            location_id: config.location_id,
        })
    }

    fn scope(&self) -> [(&str, &str); 2] {
        [("altId", self.location_id.as_str()), ("altType", ALT_TYPE)]
    }

    /// Records a payment and hands back HighLevel's status and body as is
    ///
    /// Used by the proxy endpoint, which relays failures verbatim.
    #[instrument(skip(self, payment))]
    pub async fn record_payment_raw(
        &self,
        invoice_id: &str,
        payment: &Value,
    ) -> Result<(u16, Value), HttpError> {
        let body = self.scoped_body(payment);
        let path = format!("/invoices/{invoice_id}/record-payment");
        let (status, response) = self.client.post_raw(&path, &[], &body).await?;
        if status >= 400 {
            warn!(status, invoice_id, "HighLevel rejected payment");
        }
        Ok((status, response))
    }

    /// Merges the location scope into a payment body
    fn scoped_body(&self, payment: &Value) -> Value {
        let mut body = match payment {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        body.insert("altId".to_string(), Value::from(self.location_id.as_str()));
        body.insert("altType".to_string(), Value::from(ALT_TYPE));
        Value::Object(body)
    }
}

impl DomainPort for HighLevelInvoiceGateway {}

#[async_trait]
impl InvoiceGatewayPort for HighLevelInvoiceGateway {
    #[instrument(skip(self))]
    async fn find_by_number(&self, invoice_number: &str) -> Result<ExternalInvoice, PortError> {
        let [alt_id, alt_type] = self.scope();
        let list: InvoiceList = self
            .client
            .get("/invoices/", &[alt_id, alt_type, ("limit", LIST_LIMIT), ("offset", "0")])
            .await?;

        let found = list
            .take_by_number(invoice_number)
            .ok_or_else(|| PortError::not_found("Invoice", "number", invoice_number))?;
        serde_json::from_value(found)
            .map_err(|e| PortError::transformation(format!("invoice {invoice_number}: {e}")))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, invoice_id: &str) -> Result<ExternalInvoice, PortError> {
        let path = format!("/invoices/{invoice_id}");
        Ok(self.client.get(&path, &self.scope()).await?)
    }

    #[instrument(skip(self, payment), fields(amount = %payment.amount))]
    async fn record_payment(
        &self,
        invoice_id: &str,
        payment: &RecordPaymentRequest,
    ) -> Result<PaymentReceipt, PortError> {
        let payment = serde_json::to_value(payment)
            .map_err(|e| PortError::transformation(e.to_string()))?;
        let (status, body) = self.record_payment_raw(invoice_id, &payment).await?;
        if status >= 400 {
            return Err(PortError::upstream(status, body));
        }
        info!(invoice_id, status, "Payment recorded on HighLevel");
        Ok(PaymentReceipt { status, body })
    }
}
