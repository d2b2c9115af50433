//! Web API adapters
//!
//! The front desk does not talk to Google Sheets or HighLevel itself; it
//! calls the `/api/sendToSheet` and `/api/highlevel` endpoints, which hold
//! the credentials. These adapters implement the domain ports against
//! those endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument};

use core_kernel::{DomainPort, ExternalSystemConfig, PortError};
use domain_invoice::{
    ExternalInvoice, InvoiceGatewayPort, PaymentReceipt, RecordPaymentRequest, SheetLoggerPort,
    SheetRecord,
};

use crate::client::JsonClient;
use crate::error::HttpError;

const SHEET_PATH: &str = "/api/sendToSheet";
const HIGHLEVEL_PATH: &str = "/api/highlevel";

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct InvoiceBody {
    invoice: ExternalInvoice,
}

/// Sheet logger that posts records to the web API
#[derive(Debug, Clone)]
pub struct ApiSheetLogger {
    client: JsonClient,
}

impl ApiSheetLogger {
    /// Creates a logger for the API at `config.base_url`
    pub fn new(config: ExternalSystemConfig) -> Result<Self, HttpError> {
        Ok(Self { client: JsonClient::new(config)? })
    }
}

impl DomainPort for ApiSheetLogger {}

#[async_trait]
impl SheetLoggerPort for ApiSheetLogger {
    #[instrument(skip(self, record), fields(client = %record.client_name))]
    async fn append(&self, record: &SheetRecord) -> Result<String, PortError> {
        let body: MessageBody = self.client.post(SHEET_PATH, &[], record).await?;
        info!("Record sent to sheet logger");
        Ok(body.message)
    }
}

/// Invoice gateway that goes through the web API
#[derive(Debug, Clone)]
pub struct ApiInvoiceGateway {
    client: JsonClient,
}

impl ApiInvoiceGateway {
    /// Creates a gateway for the API at `config.base_url`
    pub fn new(config: ExternalSystemConfig) -> Result<Self, HttpError> {
        Ok(Self { client: JsonClient::new(config)? })
    }
}

impl DomainPort for ApiInvoiceGateway {}

#[async_trait]
impl InvoiceGatewayPort for ApiInvoiceGateway {
    #[instrument(skip(self))]
    async fn find_by_number(&self, invoice_number: &str) -> Result<ExternalInvoice, PortError> {
        let body: InvoiceBody = self
            .client
            .get(HIGHLEVEL_PATH, &[("invoiceNumber", invoice_number)])
            .await?;
        Ok(body.invoice)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, invoice_id: &str) -> Result<ExternalInvoice, PortError> {
        let body: InvoiceBody = self
            .client
            .get(HIGHLEVEL_PATH, &[("invoiceId", invoice_id)])
            .await?;
        Ok(body.invoice)
    }

    #[instrument(skip(self, payment), fields(amount = %payment.amount))]
    async fn record_payment(
        &self,
        invoice_id: &str,
        payment: &RecordPaymentRequest,
    ) -> Result<PaymentReceipt, PortError> {
        let (status, body) = self
            .client
            .post_raw(HIGHLEVEL_PATH, &[("invoiceId", invoice_id)], payment)
            .await?;
        if status >= 400 {
            return Err(PortError::upstream(status, body));
        }
        info!(invoice_id, status, "Payment recorded");
        Ok(PaymentReceipt { status, body })
    }
}
