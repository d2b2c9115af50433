//! Port traits for the invoice domain's external collaborators

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::external::{ExternalInvoice, PaymentReceipt, RecordPaymentRequest};
use crate::record::SheetRecord;

/// Appends confirmed invoices to the tracking spreadsheet
#[async_trait]
pub trait SheetLoggerPort: DomainPort {
    /// Appends one record
    ///
    /// Returns the confirmation message to show the user.
    async fn append(&self, record: &SheetRecord) -> Result<String, PortError>;
}

/// Looks up and records payments against invoices on the invoicing platform
#[async_trait]
pub trait InvoiceGatewayPort: DomainPort {
    /// Finds an invoice by its human-facing number
    ///
    /// Fails with `PortError::NotFound` when no invoice carries that number.
    async fn find_by_number(&self, invoice_number: &str) -> Result<ExternalInvoice, PortError>;

    /// Fetches an invoice by the platform's id
    async fn get_by_id(&self, invoice_id: &str) -> Result<ExternalInvoice, PortError>;

    /// Records a payment, returning the platform's status and raw body
    ///
    /// Statuses of 400 and above come back as `PortError::Upstream`.
    async fn record_payment(
        &self,
        invoice_id: &str,
        payment: &RecordPaymentRequest,
    ) -> Result<PaymentReceipt, PortError>;
}
