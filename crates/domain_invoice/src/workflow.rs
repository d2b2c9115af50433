//! Confirmation workflow
//!
//! The calculator is the single owner of the front desk's state. Inputs
//! and toggles can change at any time and the live totals follow them, but
//! nothing becomes official until the details are confirmed:
//!
//! ```text
//! Editing --request_calculation--> Confirming --confirm--> Confirmed
//!    ^                                 |
//!    +------- cancel / invalid --------+
//! ```
//!
//! Confirming freezes an `InvoiceRecord`, unlocks printing and emits the
//! side effects the session runs in the background: logging the record and,
//! for locations billed through the invoicing platform, looking the invoice
//! up there. Side effects are handed out as [`Dispatch`] values tagged with
//! the calculator's epoch; their results come back through [`Calculator::apply`].
//! `clear_fields` starts a new epoch so that results still in flight from
//! before the reset are dropped on arrival.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::PortError;

use crate::document::InvoiceDocument;
use crate::error::InvoiceError;
use crate::external::{ExternalInvoice, PaymentPlan, PaymentReceipt, RecordPaymentRequest};
use crate::fees::{ComputedTotals, FeeSchedule, FeeToggles, InvoiceInputs};
use crate::input::{AmountField, InvoiceNumberField};
use crate::location::Location;
use crate::record::{InvoiceRecord, SheetRecord};

/// Where the calculator is in the confirmation workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Fields are being filled in; nothing is committed
    #[default]
    Editing,
    /// Client details are being entered for confirmation
    Confirming,
    /// A record has been committed and can be printed
    Confirmed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Editing => f.write_str("editing"),
            Phase::Confirming => f.write_str("confirming"),
            Phase::Confirmed => f.write_str("confirmed"),
        }
    }
}

/// State of the invoicing-platform lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GatewayState {
    #[default]
    Idle,
    Searching,
    Found(ExternalInvoice),
    NotFound(String),
    Failed(String),
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient notification for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// A side effect to run against an external collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AppendToSheet(SheetRecord),
    LookupInvoice {
        invoice_number: String,
    },
    RecordPayment {
        invoice_id: String,
        plan: PaymentPlan,
        request: RecordPaymentRequest,
    },
    RefreshInvoice {
        invoice_id: String,
    },
}

/// A command tagged with the epoch it was issued in
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub epoch: u64,
    pub command: Command,
}

/// The outcome of a command
#[derive(Debug)]
pub enum Completion {
    SheetAppended(Result<String, PortError>),
    InvoiceFound(Result<ExternalInvoice, PortError>),
    PaymentRecorded {
        invoice_id: String,
        plan: PaymentPlan,
        result: Result<PaymentReceipt, PortError>,
    },
    InvoiceRefreshed(Result<ExternalInvoice, PortError>),
}

/// The front-desk invoice calculator
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    subtotal: AmountField,
    discount: AmountField,
    cash: AmountField,
    deposit: AmountField,
    toggles: FeeToggles,
    location: Location,
    client_name: String,
    invoice_number: InvoiceNumberField,
    phase: Phase,
    committed: Option<InvoiceRecord>,
    gateway: GatewayState,
    schedule: FeeSchedule,
    epoch: u64,
    notices: Vec<Notice>,
}

impl Calculator {
    /// Creates a calculator in its initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator that stacks fees with a custom schedule
    pub fn with_schedule(schedule: FeeSchedule) -> Self {
        Self { schedule, ..Self::default() }
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn set_subtotal(&mut self, text: &str) -> bool {
        self.subtotal.accept(text)
    }

    pub fn set_discount(&mut self, text: &str) -> bool {
        self.discount.accept(text)
    }

    pub fn set_cash(&mut self, text: &str) -> bool {
        self.cash.accept(text)
    }

    pub fn set_deposit(&mut self, text: &str) -> bool {
        self.deposit.accept(text)
    }

    pub fn set_financing(&mut self, on: bool) {
        self.toggles.apply_financing = on;
    }

    pub fn set_delivery(&mut self, on: bool) {
        self.toggles.apply_delivery = on;
    }

    pub fn set_laboratory(&mut self, on: bool) {
        self.toggles.apply_laboratory = on;
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    /// Offers text to the invoice number field; see [`InvoiceNumberField`]
    pub fn set_invoice_number(&mut self, text: &str) -> bool {
        self.invoice_number.accept(text)
    }

    /// Pads the invoice number to six digits, as when the field loses focus
    pub fn format_invoice_number(&mut self) {
        self.invoice_number.format();
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn inputs(&self) -> InvoiceInputs {
        InvoiceInputs {
            subtotal: self.subtotal.value(),
            discount: self.discount.value(),
            cash: self.cash.value(),
            deposit: self.deposit.value(),
        }
    }

    pub fn toggles(&self) -> FeeToggles {
        self.toggles
    }

    /// Totals for the current inputs; recomputed on every call
    pub fn totals(&self) -> ComputedTotals {
        self.schedule.compute(&self.inputs(), &self.toggles)
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn invoice_number(&self) -> &str {
        self.invoice_number.value()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The record committed at the last confirmation
    pub fn committed(&self) -> Option<&InvoiceRecord> {
        self.committed.as_ref()
    }

    /// The total shown to the user: frozen at confirmation, zero before
    pub fn display_total(&self) -> core_kernel::Money {
        self.committed
            .as_ref()
            .map(|r| r.totals.final_total)
            .unwrap_or_default()
    }

    pub fn is_print_enabled(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    pub fn gateway(&self) -> &GatewayState {
        &self.gateway
    }

    /// The invoice found on the platform, if any
    pub fn found_invoice(&self) -> Option<&ExternalInvoice> {
        match &self.gateway {
            GatewayState::Found(invoice) => Some(invoice),
            _ => None,
        }
    }

    /// Whether a payment can be run against the found invoice
    pub fn is_payment_available(&self) -> bool {
        self.found_invoice().is_some_and(|invoice| !invoice.is_paid())
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Notifications raised since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Opens the confirmation step
    pub fn request_calculation(&mut self) {
        self.phase = Phase::Confirming;
    }

    /// Leaves the confirmation step without committing anything
    pub fn cancel_confirmation(&mut self) {
        if self.phase == Phase::Confirming {
            self.phase = self.resting_phase();
        }
    }

    /// Validates the details and commits the current totals
    ///
    /// On success the record is frozen, printing is enabled, and the
    /// returned dispatches log the record and (where the location uses
    /// invoice numbers) look the invoice up on the platform. On a
    /// validation failure a warning is raised and nothing committed
    /// earlier is touched.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<Vec<Dispatch>, InvoiceError> {
        if self.phase != Phase::Confirming {
            return Err(InvoiceError::InvalidTransition {
                action: "confirm",
                phase: self.phase,
            });
        }

        if let Err(err) = self.validate_details() {
            warn!(error = %err, "Invoice confirmation rejected");
            self.phase = self.resting_phase();
            self.notify(NoticeLevel::Warning, err.to_string());
            return Err(err);
        }

        self.invoice_number.format();
        let invoice_number = (self.location.requires_invoice_number()
            && !self.invoice_number.is_blank())
        .then(|| self.invoice_number.value().to_string());

        let record = InvoiceRecord {
            client_name: self.client_name.trim().to_string(),
            invoice_number,
            location: self.location,
            inputs: self.inputs(),
            toggles: self.toggles,
            totals: self.totals(),
        };

        info!(
            location = %record.location,
            invoice = record.invoice_label().as_deref().unwrap_or("-"),
            final_total = %record.totals.final_total,
            "Invoice confirmed"
        );

        let mut dispatches = vec![self.dispatch(Command::AppendToSheet(record.to_sheet_record(now)))];
        self.committed = Some(record);
        self.phase = Phase::Confirmed;

        if self.location.requires_invoice_number() && !self.invoice_number.is_blank() {
            dispatches.push(self.begin_lookup());
        }

        Ok(dispatches)
    }

    /// Lays out the committed invoice for printing
    ///
    /// Refused before confirmation, and refused with a warning when the
    /// location uses invoice numbers but none is entered.
    pub fn print(&mut self) -> Result<InvoiceDocument, InvoiceError> {
        let record = match (&self.committed, self.phase) {
            (Some(record), Phase::Confirmed) => record,
            _ => return Err(InvoiceError::NotConfirmed),
        };

        if self.location.requires_invoice_number() && self.invoice_number.is_blank() {
            let err = InvoiceError::PrintRequiresInvoiceNumber;
            self.notify(NoticeLevel::Warning, err.to_string());
            return Err(err);
        }

        Ok(InvoiceDocument::from_record(record, &self.schedule))
    }

    /// Searches the invoicing platform by the entered invoice number
    ///
    /// A new search replaces whatever an earlier one found.
    pub fn search_invoice(&mut self) -> Result<Dispatch, InvoiceError> {
        if self.phase != Phase::Confirmed {
            return Err(InvoiceError::NotConfirmed);
        }
        if self.invoice_number.is_blank() {
            let err = InvoiceError::NoInvoiceNumberToSearch;
            self.notify(NoticeLevel::Warning, err.to_string());
            return Err(err);
        }

        Ok(self.begin_lookup())
    }

    /// Charges whatever is owed on the found invoice
    ///
    /// Returns `Ok(None)` with an informational notice when nothing is owed.
    pub fn mark_as_paid(&mut self, now: DateTime<Utc>) -> Result<Option<Dispatch>, InvoiceError> {
        let invoice = self.found_invoice().ok_or(InvoiceError::NoInvoiceLoaded)?;

        let Some(plan) = PaymentPlan::for_invoice(invoice) else {
            info!(invoice_id = %invoice.id, "Invoice has no pending balance");
            self.notify(NoticeLevel::Info, "This invoice has no pending balance.");
            return Ok(None);
        };

        let invoice_id = invoice.id.clone();
        info!(
            invoice_id = %invoice_id,
            amount = %plan.amount,
            installments = plan.schedule_ids.len(),
            "Recording front-desk payment"
        );

        let request = plan.to_request(now);
        Ok(Some(self.dispatch(Command::RecordPayment { invoice_id, plan, request })))
    }

    /// Re-reads the found invoice from the platform
    ///
    /// The local snapshot is only updated optimistically after a payment;
    /// this is how to see the platform's authoritative state.
    pub fn refresh_invoice(&mut self) -> Result<Dispatch, InvoiceError> {
        let invoice_id = self
            .found_invoice()
            .map(|invoice| invoice.id.clone())
            .ok_or(InvoiceError::NoInvoiceLoaded)?;

        Ok(self.dispatch(Command::RefreshInvoice { invoice_id }))
    }

    /// Applies the outcome of a command
    ///
    /// Outcomes from before the last `clear_fields` are dropped. Returns
    /// whether the outcome was applied.
    pub fn apply(&mut self, epoch: u64, completion: Completion) -> bool {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "Dropping result from before reset");
            return false;
        }

        match completion {
            Completion::SheetAppended(Ok(message)) => {
                info!("Invoice logged to sheet");
                self.notify(NoticeLevel::Success, message);
            }
            Completion::SheetAppended(Err(err)) => {
                warn!(error = %err, "Sheet logging failed");
                self.notify_error(&err);
            }
            Completion::InvoiceFound(Ok(invoice)) => {
                info!(invoice_id = %invoice.id, "Invoice found on platform");
                self.gateway = GatewayState::Found(invoice);
                self.notify(NoticeLevel::Success, "HighLevel Invoice found!");
            }
            Completion::InvoiceFound(Err(err)) => {
                warn!(error = %err, "Invoice lookup failed");
                self.gateway = if err.is_not_found() {
                    GatewayState::NotFound(err.to_string())
                } else {
                    GatewayState::Failed(err.to_string())
                };
                self.notify_error(&err);
            }
            Completion::PaymentRecorded { invoice_id, plan, result: Ok(_) } => {
                match &mut self.gateway {
                    GatewayState::Found(invoice) if invoice.id == invoice_id => {
                        invoice.apply_payment(&plan);
                    }
                    _ => debug!(invoice_id = %invoice_id, "Payment recorded for an invoice no longer shown"),
                }
                self.notify(NoticeLevel::Success, "Pago registrado exitosamente!");
            }
            Completion::PaymentRecorded { invoice_id, result: Err(err), .. } => {
                warn!(invoice_id = %invoice_id, error = %err, "Recording payment failed");
                self.notify_error(&err);
            }
            Completion::InvoiceRefreshed(Ok(invoice)) => {
                self.gateway = GatewayState::Found(invoice);
            }
            Completion::InvoiceRefreshed(Err(err)) => {
                warn!(error = %err, "Invoice refresh failed");
                self.notify_error(&err);
            }
        }

        true
    }

    /// Resets everything to the initial state
    ///
    /// The selected location and pending notifications survive. Requests
    /// already in flight are not cancelled; their results are dropped.
    pub fn clear_fields(&mut self) {
        *self = Self {
            location: self.location,
            schedule: self.schedule,
            epoch: self.epoch + 1,
            notices: std::mem::take(&mut self.notices),
            ..Self::default()
        };
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn validate_details(&self) -> Result<(), InvoiceError> {
        if self.client_name.trim().is_empty() {
            return Err(InvoiceError::MissingClientName);
        }
        if self.location.requires_invoice_number() && self.invoice_number.is_blank() {
            return Err(InvoiceError::MissingInvoiceNumber);
        }
        Ok(())
    }

    /// Phase to fall back to when leaving the confirmation step
    fn resting_phase(&self) -> Phase {
        if self.committed.is_some() {
            Phase::Confirmed
        } else {
            Phase::Editing
        }
    }

    fn begin_lookup(&mut self) -> Dispatch {
        self.gateway = GatewayState::Searching;
        let invoice_number = self.invoice_number.value().to_string();
        self.dispatch(Command::LookupInvoice { invoice_number })
    }

    fn dispatch(&self, command: Command) -> Dispatch {
        Dispatch { epoch: self.epoch, command }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice { level, message: message.into() });
    }

    fn notify_error(&mut self, err: &PortError) {
        self.notify(NoticeLevel::Error, format!("Error: {err}"));
    }
}
