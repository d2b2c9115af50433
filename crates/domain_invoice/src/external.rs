//! Invoices held by the external invoicing platform
//!
//! The platform owns these records; the calculator only keeps a read-only
//! snapshot for display and for working out what to charge. Fields the
//! calculator does not read are carried through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::Money;

use crate::record::iso_timestamp;

/// Payment mode sent when recording a front-desk payment
pub const PAYMENT_MODE: &str = "other";

/// Note attached to every front-desk payment
pub const PAYMENT_NOTES: &str = "Pago hecho en Frontdesk";

/// Status of an external invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    PartiallyPaid,
    Overdue,
    Void,
    /// Any status this crate does not interpret
    Other(String),
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "draft" => InvoiceStatus::Draft,
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            "partially_paid" => InvoiceStatus::PartiallyPaid,
            "overdue" => InvoiceStatus::Overdue,
            "void" => InvoiceStatus::Void,
            _ => InvoiceStatus::Other(value),
        }
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Draft => "draft".to_string(),
            InvoiceStatus::Sent => "sent".to_string(),
            InvoiceStatus::Paid => "paid".to_string(),
            InvoiceStatus::PartiallyPaid => "partially_paid".to_string(),
            InvoiceStatus::Overdue => "overdue".to_string(),
            InvoiceStatus::Void => "void".to_string(),
            InvoiceStatus::Other(other) => other,
        }
    }
}

/// Status of one scheduled installment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    Paid,
    Other(String),
}

impl From<String> for ScheduleStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => ScheduleStatus::Pending,
            "paid" => ScheduleStatus::Paid,
            _ => ScheduleStatus::Other(value),
        }
    }
}

impl From<ScheduleStatus> for String {
    fn from(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Pending => "pending".to_string(),
            ScheduleStatus::Paid => "paid".to_string(),
            ScheduleStatus::Other(other) => other,
        }
    }
}

/// Contact the invoice is billed to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One scheduled installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub value: Money,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The installment plan attached to an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleSet {
    #[serde(default)]
    pub schedules: Vec<PaymentSchedule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of an invoice on the invoicing platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInvoice {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub contact_details: ContactDetails,
    #[serde(default)]
    pub total: Money,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_schedule: Option<PaymentScheduleSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExternalInvoice {
    /// Installments still waiting for payment
    pub fn pending_schedules(&self) -> Vec<&PaymentSchedule> {
        self.payment_schedule
            .iter()
            .flat_map(|set| set.schedules.iter())
            .filter(|s| s.status == ScheduleStatus::Pending)
            .collect()
    }

    /// Total minus what has been paid; may be zero or negative
    pub fn balance_due(&self) -> Money {
        self.total - self.amount_paid
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Applies a recorded payment to this local snapshot
    ///
    /// This is display state only. The platform remains the source of
    /// truth; re-fetch the invoice to see its authoritative state.
    pub fn apply_payment(&mut self, plan: &PaymentPlan) {
        self.amount_paid = self.amount_paid + plan.amount;
        self.status = if self.amount_paid >= self.total {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::PartiallyPaid
        };

        if let Some(set) = self.payment_schedule.as_mut() {
            for schedule in set.schedules.iter_mut() {
                if plan.schedule_ids.contains(&schedule.id) {
                    schedule.status = ScheduleStatus::Paid;
                }
            }
        }
    }
}

/// What a front-desk payment will charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPlan {
    pub amount: Money,
    /// Installments settled by this payment; empty for a balance payment
    pub schedule_ids: Vec<String>,
}

impl PaymentPlan {
    /// Works out the charge for an invoice
    ///
    /// Pending installments are paid together when there are any.
    /// Otherwise the outstanding balance is charged. Returns `None` when
    /// nothing is owed.
    pub fn for_invoice(invoice: &ExternalInvoice) -> Option<Self> {
        let pending = invoice.pending_schedules();
        if !pending.is_empty() {
            return Some(Self {
                amount: pending.iter().map(|s| s.value).sum(),
                schedule_ids: pending.iter().map(|s| s.id.clone()).collect(),
            });
        }

        let balance = invoice.balance_due();
        if balance.is_positive() {
            Some(Self {
                amount: balance,
                schedule_ids: Vec::new(),
            })
        } else {
            None
        }
    }

    /// Builds the record-payment request body
    pub fn to_request(&self, fulfilled_at: DateTime<Utc>) -> RecordPaymentRequest {
        RecordPaymentRequest {
            mode: PAYMENT_MODE.to_string(),
            notes: PAYMENT_NOTES.to_string(),
            amount: self.amount,
            payment_schedule_ids: self.schedule_ids.clone(),
            fulfilled_at: iso_timestamp(fulfilled_at),
        }
    }
}

/// Body of a record-payment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub mode: String,
    pub notes: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_schedule_ids: Vec<String>,
    pub fulfilled_at: String,
}

/// The platform's answer to a recorded payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    /// HTTP status the platform answered with
    pub status: u16,
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn invoice_json() -> Value {
        json!({
            "_id": "inv_abc",
            "invoiceNumber": "000123",
            "contactDetails": { "name": "Ana Ruiz", "email": "ana@example.com", "phoneNo": "+1305" },
            "total": 1500,
            "amountPaid": 500,
            "status": "sent",
            "currency": "USD",
            "paymentSchedule": {
                "type": "fixed",
                "schedules": [
                    { "_id": "s1", "value": 100, "status": "paid" },
                    { "_id": "s2", "value": 150, "status": "pending" },
                    { "_id": "s3", "value": 150, "status": "pending" }
                ]
            }
        })
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let invoice: ExternalInvoice = serde_json::from_value(invoice_json()).unwrap();
        assert_eq!(invoice.extra.get("currency"), Some(&json!("USD")));

        let back = serde_json::to_value(&invoice).unwrap();
        assert_eq!(back["contactDetails"]["phoneNo"], json!("+1305"));
        assert_eq!(back["paymentSchedule"]["type"], json!("fixed"));
        assert_eq!(back["status"], json!("sent"));
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let mut value = invoice_json();
        value["status"] = json!("payment_processing");
        let invoice: ExternalInvoice = serde_json::from_value(value).unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Other("payment_processing".to_string()));
    }

    #[test]
    fn test_plan_sums_pending_schedules() {
        let invoice: ExternalInvoice = serde_json::from_value(invoice_json()).unwrap();
        let plan = PaymentPlan::for_invoice(&invoice).unwrap();

        assert_eq!(plan.amount.amount(), dec!(300));
        assert_eq!(plan.schedule_ids, vec!["s2".to_string(), "s3".to_string()]);
    }

    #[test]
    fn test_request_omits_empty_schedule_ids() {
        let plan = PaymentPlan { amount: Money::new(dec!(25)), schedule_ids: Vec::new() };
        let body = serde_json::to_value(plan.to_request(Utc::now())).unwrap();

        assert_eq!(body["mode"], json!("other"));
        assert!(body.get("paymentScheduleIds").is_none());
    }
}
