//! Invoice domain errors

use thiserror::Error;

use crate::workflow::Phase;

/// Errors that can occur while driving the invoice workflow
///
/// None of these are fatal: each leaves the calculator in a consistent
/// state the user can continue from. The display text doubles as the
/// warning shown at the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    /// Client name left blank at confirmation
    #[error("Please fill in the client name.")]
    MissingClientName,

    /// Invoice number left blank for a location that needs one
    #[error("Please fill in the invoice number.")]
    MissingInvoiceNumber,

    /// Operation not allowed in the current phase
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: Phase,
    },

    /// Print or search requested before the details were confirmed
    #[error("Confirm the invoice details before continuing.")]
    NotConfirmed,

    /// Print refused because the invoice number is missing
    #[error("Enter the INV- invoice number and press Calculate before printing.")]
    PrintRequiresInvoiceNumber,

    /// Search requested without an invoice number
    #[error("Please enter the invoice number in the details first.")]
    NoInvoiceNumberToSearch,

    /// Payment or refresh requested with no invoice loaded
    #[error("No invoice has been loaded from the invoicing platform.")]
    NoInvoiceLoaded,
}
