//! In-memory ports
//!
//! Stand-ins for the sheet logger and the invoicing platform that record
//! every call and answer from canned data. Each can be told to fail, and
//! the gateway can be held at a gate so tests can observe the calculator
//! while a request is still in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Semaphore;

use core_kernel::{DomainPort, PortError};
use domain_invoice::{
    ExternalInvoice, InvoiceGatewayPort, PaymentReceipt, RecordPaymentRequest, SheetLoggerPort,
    SheetRecord,
};

/// Produces the error a failing fake answers with
type FailureFn = Box<dyn Fn() -> PortError + Send + Sync>;

/// Sheet logger that keeps appended records in memory
#[derive(Default)]
pub struct InMemorySheetLogger {
    records: Mutex<Vec<SheetRecord>>,
    failure: Mutex<Option<FailureFn>>,
}

impl InMemorySheetLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following append fail with the error `make` builds
    pub fn fail_with(&self, make: impl Fn() -> PortError + Send + Sync + 'static) {
        *self.failure.lock().unwrap() = Some(Box::new(make));
    }

    pub fn records(&self) -> Vec<SheetRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl DomainPort for InMemorySheetLogger {}

#[async_trait]
impl SheetLoggerPort for InMemorySheetLogger {
    async fn append(&self, record: &SheetRecord) -> Result<String, PortError> {
        if let Some(make) = self.failure.lock().unwrap().as_ref() {
            return Err(make());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok("Todo salio bien!".to_string())
    }
}

/// Invoicing platform backed by a map of invoices
pub struct InMemoryInvoiceGateway {
    invoices: Mutex<HashMap<String, ExternalInvoice>>,
    payments: Mutex<Vec<(String, RecordPaymentRequest)>>,
    lookups: Mutex<Vec<String>>,
    failure: Mutex<Option<FailureFn>>,
    payment_status: Mutex<u16>,
    gate: Arc<Semaphore>,
}

impl Default for InMemoryInvoiceGateway {
    fn default() -> Self {
        Self {
            invoices: Mutex::new(HashMap::new()),
            payments: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            payment_status: Mutex::new(200),
            gate: Arc::new(Semaphore::new(Semaphore::MAX_PERMITS)),
        }
    }
}

impl InMemoryInvoiceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invoice(self, invoice: ExternalInvoice) -> Self {
        self.insert(invoice);
        self
    }

    pub fn insert(&self, invoice: ExternalInvoice) {
        self.invoices.lock().unwrap().insert(invoice.id.clone(), invoice);
    }

    /// Makes every following call fail with the error `make` builds
    pub fn fail_with(&self, make: impl Fn() -> PortError + Send + Sync + 'static) {
        *self.failure.lock().unwrap() = Some(Box::new(make));
    }

    /// Sets the success status recorded payments are answered with
    pub fn answer_payments_with(&self, status: u16) {
        *self.payment_status.lock().unwrap() = status;
    }

    /// A gateway whose calls wait until [`InMemoryInvoiceGateway::release`]
    pub fn gated() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            ..Self::default()
        }
    }

    /// Lets `n` waiting calls through
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn payments(&self) -> Vec<(String, RecordPaymentRequest)> {
        self.payments.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    async fn pass_gate(&self) -> Result<(), PortError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| PortError::internal("gate closed"))?;
        permit.forget();

        match self.failure.lock().unwrap().as_ref() {
            Some(make) => Err(make()),
            None => Ok(()),
        }
    }
}

impl DomainPort for InMemoryInvoiceGateway {}

#[async_trait]
impl InvoiceGatewayPort for InMemoryInvoiceGateway {
    async fn find_by_number(&self, invoice_number: &str) -> Result<ExternalInvoice, PortError> {
        self.lookups.lock().unwrap().push(invoice_number.to_string());
        self.pass_gate().await?;

        self.invoices
            .lock()
            .unwrap()
            .values()
            .find(|invoice| invoice.invoice_number == invoice_number)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", "number", invoice_number))
    }

    async fn get_by_id(&self, invoice_id: &str) -> Result<ExternalInvoice, PortError> {
        self.pass_gate().await?;

        self.invoices
            .lock()
            .unwrap()
            .get(invoice_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", "id", invoice_id))
    }

    async fn record_payment(
        &self,
        invoice_id: &str,
        payment: &RecordPaymentRequest,
    ) -> Result<PaymentReceipt, PortError> {
        self.pass_gate().await?;

        let mut invoices = self.invoices.lock().unwrap();
        let invoice = invoices
            .get_mut(invoice_id)
            .ok_or_else(|| PortError::not_found("Invoice", "id", invoice_id))?;
        invoice.amount_paid = invoice.amount_paid + payment.amount;

        self.payments
            .lock()
            .unwrap()
            .push((invoice_id.to_string(), payment.clone()));
        Ok(PaymentReceipt {
            status: *self.payment_status.lock().unwrap(),
            body: json!({ "_id": invoice_id, "amountPaid": invoice.amount_paid }),
        })
    }
}
