//! Runs a calculator against its external collaborators
//!
//! The session owns the calculator and is the only thing that mutates it.
//! Commands the calculator hands out run as tasks on a `JoinSet`; finished
//! tasks are folded back in by `poll_completions` or `settle`, so the
//! calculator stays usable while requests are in flight.
//!
//! `confirm`, `search_invoice`, `mark_as_paid` and `refresh_invoice` spawn
//! onto the current Tokio runtime and panic when called outside one.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::document::InvoiceDocument;
use crate::error::InvoiceError;
use crate::ports::{InvoiceGatewayPort, SheetLoggerPort};
use crate::workflow::{Calculator, Command, Completion, Dispatch, Notice};

/// A calculator wired to a sheet logger and an invoice gateway
pub struct Session {
    calculator: Calculator,
    sheet_logger: Arc<dyn SheetLoggerPort>,
    gateway: Arc<dyn InvoiceGatewayPort>,
    in_flight: JoinSet<(u64, Completion)>,
}

impl Session {
    pub fn new(
        sheet_logger: Arc<dyn SheetLoggerPort>,
        gateway: Arc<dyn InvoiceGatewayPort>,
    ) -> Self {
        Self::with_calculator(Calculator::new(), sheet_logger, gateway)
    }

    pub fn with_calculator(
        calculator: Calculator,
        sheet_logger: Arc<dyn SheetLoggerPort>,
        gateway: Arc<dyn InvoiceGatewayPort>,
    ) -> Self {
        Self {
            calculator,
            sheet_logger,
            gateway,
            in_flight: JoinSet::new(),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Mutable access for field edits and other synchronous transitions
    pub fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }

    /// Number of commands still running
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Confirms the details and starts logging and lookup in the background
    ///
    /// Must be called within a Tokio runtime.
    pub fn confirm(&mut self) -> Result<(), InvoiceError> {
        let dispatches = self.calculator.confirm(Utc::now())?;
        for dispatch in dispatches {
            self.spawn(dispatch);
        }
        Ok(())
    }

    pub fn print(&mut self) -> Result<InvoiceDocument, InvoiceError> {
        self.calculator.print()
    }

    /// Starts a lookup by the entered invoice number
    ///
    /// Must be called within a Tokio runtime.
    pub fn search_invoice(&mut self) -> Result<(), InvoiceError> {
        let dispatch = self.calculator.search_invoice()?;
        self.spawn(dispatch);
        Ok(())
    }

    /// Starts a payment; does nothing beyond a notice when nothing is owed
    ///
    /// Must be called within a Tokio runtime.
    pub fn mark_as_paid(&mut self) -> Result<(), InvoiceError> {
        if let Some(dispatch) = self.calculator.mark_as_paid(Utc::now())? {
            self.spawn(dispatch);
        }
        Ok(())
    }

    /// Re-reads the found invoice in the background
    ///
    /// Must be called within a Tokio runtime.
    pub fn refresh_invoice(&mut self) -> Result<(), InvoiceError> {
        let dispatch = self.calculator.refresh_invoice()?;
        self.spawn(dispatch);
        Ok(())
    }

    /// Resets the calculator; requests in flight finish but are ignored
    pub fn clear_fields(&mut self) {
        self.calculator.clear_fields();
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.calculator.take_notices()
    }

    /// Applies every completion that is already available
    ///
    /// Returns the number of completions applied.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.in_flight.try_join_next() {
            if self.absorb(joined) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for every command in flight and applies the results
    pub async fn settle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.in_flight.join_next().await {
            if self.absorb(joined) {
                applied += 1;
            }
        }
        applied
    }

    fn absorb(&mut self, joined: Result<(u64, Completion), tokio::task::JoinError>) -> bool {
        match joined {
            Ok((epoch, completion)) => self.calculator.apply(epoch, completion),
            Err(err) => {
                error!(error = %err, "Background command did not complete");
                false
            }
        }
    }

    fn spawn(&mut self, dispatch: Dispatch) {
        let Dispatch { epoch, command } = dispatch;
        debug!(epoch, ?command, "Spawning command");

        let sheet_logger = Arc::clone(&self.sheet_logger);
        let gateway = Arc::clone(&self.gateway);
        self.in_flight.spawn(async move {
            let completion = run_command(command, sheet_logger.as_ref(), gateway.as_ref()).await;
            (epoch, completion)
        });
    }
}

/// Executes one command against the collaborators
pub async fn run_command(
    command: Command,
    sheet_logger: &dyn SheetLoggerPort,
    gateway: &dyn InvoiceGatewayPort,
) -> Completion {
    match command {
        Command::AppendToSheet(record) => Completion::SheetAppended(sheet_logger.append(&record).await),
        Command::LookupInvoice { invoice_number } => {
            Completion::InvoiceFound(gateway.find_by_number(&invoice_number).await)
        }
        Command::RecordPayment { invoice_id, plan, request } => {
            let result = gateway.record_payment(&invoice_id, &request).await;
            Completion::PaymentRecorded { invoice_id, plan, result }
        }
        Command::RefreshInvoice { invoice_id } => {
            Completion::InvoiceRefreshed(gateway.get_by_id(&invoice_id).await)
        }
    }
}
