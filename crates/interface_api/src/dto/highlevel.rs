//! Invoicing proxy DTOs

use serde::{Deserialize, Serialize};

use domain_invoice::ExternalInvoice;

/// Query string of `/api/highlevel`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighLevelQuery {
    pub invoice_number: Option<String>,
    pub invoice_id: Option<String>,
}

impl HighLevelQuery {
    /// The invoice number, if one was given and is not blank
    pub fn invoice_number(&self) -> Option<&str> {
        non_blank(&self.invoice_number)
    }

    /// The invoice id, if one was given and is not blank
    pub fn invoice_id(&self) -> Option<&str> {
        non_blank(&self.invoice_id)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub invoice: ExternalInvoice,
}
