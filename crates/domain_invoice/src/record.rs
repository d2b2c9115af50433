//! Confirmed invoice records and the tracking-sheet row
//!
//! An `InvoiceRecord` exists only once the details have been confirmed. It
//! freezes the totals so that printing and logging see exactly what was
//! confirmed, whatever is typed afterwards.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::Money;

use crate::fees::{ComputedTotals, FeeToggles, InvoiceInputs};
use crate::location::{Location, NOT_APPLICABLE};

/// Header row written to every weekly sheet
pub const SHEET_HEADERS: [&str; 13] = [
    "Timestamp",
    "Location",
    "Client Name",
    "INV Number",
    "Subtotal",
    "Discount",
    "Cash",
    "Taxes",
    "Deposit",
    "Financing Fee",
    "Delivery Fee",
    "Laboratory Fee",
    "Final Total",
];

/// Formats a timestamp as RFC 3339 UTC with milliseconds
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Name of the sheet a record logged on `date` lands in
///
/// Weeks start on Monday and are numbered the ISO way.
pub fn weekly_sheet_title(date: NaiveDate) -> String {
    format!("Semana-{}-{}", date.iso_week().week(), date.year())
}

/// A confirmed invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub client_name: String,
    /// Six-digit number; only present for locations that use one
    pub invoice_number: Option<String>,
    pub location: Location,
    pub inputs: InvoiceInputs,
    pub toggles: FeeToggles,
    pub totals: ComputedTotals,
}

impl InvoiceRecord {
    /// Returns the printed invoice label, e.g. `INV-000123`
    pub fn invoice_label(&self) -> Option<String> {
        self.invoice_number
            .as_deref()
            .and_then(|n| self.location.invoice_label(n))
    }

    /// Builds the row sent to the tracking sheet
    pub fn to_sheet_record(&self, at: DateTime<Utc>) -> SheetRecord {
        SheetRecord {
            timestamp: iso_timestamp(at),
            office_name: self.location.office().name.to_string(),
            client_name: self.client_name.clone(),
            invoice_number: self
                .invoice_label()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            subtotal: self.inputs.subtotal,
            discount: self.inputs.discount,
            cash: self.inputs.cash,
            taxes: self.totals.taxes,
            deposit: self.inputs.deposit,
            financing_fee: self.totals.financing_fee,
            delivery_fee: self.totals.delivery_fee,
            laboratory_fee: self.totals.laboratory_fee,
            final_total: self.totals.final_total,
        }
    }
}

/// Body of a sheet-logger append call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub timestamp: String,
    pub office_name: String,
    pub client_name: String,
    pub invoice_number: String,
    pub subtotal: Money,
    pub discount: Money,
    pub cash: Money,
    pub taxes: Money,
    pub deposit: Money,
    pub financing_fee: Money,
    pub delivery_fee: Money,
    pub laboratory_fee: Money,
    pub final_total: Money,
}

impl SheetRecord {
    /// Returns the cells in header order
    pub fn to_row(&self) -> Vec<Value> {
        let amount = |m: &Money| serde_json::to_value(m).unwrap_or(Value::Null);
        vec![
            Value::from(self.timestamp.as_str()),
            Value::from(self.office_name.as_str()),
            Value::from(self.client_name.as_str()),
            Value::from(self.invoice_number.as_str()),
            amount(&self.subtotal),
            amount(&self.discount),
            amount(&self.cash),
            amount(&self.taxes),
            amount(&self.deposit),
            amount(&self.financing_fee),
            amount(&self.delivery_fee),
            amount(&self.laboratory_fee),
            amount(&self.final_total),
        ]
    }

    /// Returns the sheet title for the moment this record was stamped
    ///
    /// Falls back to `now` when the timestamp cannot be read.
    pub fn sheet_title(&self, now: DateTime<Utc>) -> String {
        let date = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc).date_naive())
            .unwrap_or_else(|_| now.date_naive());
        weekly_sheet_title(date)
    }
}
