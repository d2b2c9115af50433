//! Invoice Domain - Front-Desk Invoice Calculator
//!
//! This crate turns the amounts typed at a clinic's front desk into a final
//! invoice total, commits that total through a confirmation step, and
//! coordinates the two systems that hear about it afterwards: the weekly
//! tracking spreadsheet and the external invoicing platform.
//!
//! # Fee Stacking
//!
//! ```text
//! base        = max(0, subtotal - discount - cash - deposit)
//! taxes       = base * 7%
//! net         = base + taxes
//! financing   = net * 10%      (when applied)
//! final_total = net + financing + delivery ($100) + laboratory ($150)
//! ```
//!
//! Amounts keep full precision; rounding to cents only happens for display.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoice::{Calculator, Location};
//!
//! let mut calc = Calculator::new();
//! calc.set_subtotal("650");
//! calc.set_location(Location::Lales);
//! calc.set_invoice_number("123");
//!
//! calc.request_calculation();
//! calc.set_client_name("Ana Ruiz");
//! let dispatches = calc.confirm(chrono::Utc::now())?;
//!
//! let document = calc.print()?;
//! println!("{document}");
//! ```

pub mod input;
pub mod fees;
pub mod location;
pub mod record;
pub mod external;
pub mod document;
pub mod workflow;
pub mod session;
pub mod ports;
pub mod error;

pub use input::{parse_amount, AmountField, InvoiceNumberField};
pub use fees::{compute_totals, ComputedTotals, FeeSchedule, FeeToggles, InvoiceInputs};
pub use location::{Location, Office, INVOICE_PREFIX, NOT_APPLICABLE};
pub use record::{weekly_sheet_title, InvoiceRecord, SheetRecord, SHEET_HEADERS};
pub use external::{
    ExternalInvoice, InvoiceStatus, PaymentPlan, PaymentReceipt, PaymentSchedule,
    RecordPaymentRequest, ScheduleStatus,
};
pub use document::{InvoiceDocument, SummaryLine};
pub use workflow::{Calculator, Command, Completion, Dispatch, GatewayState, Notice, NoticeLevel, Phase};
pub use session::Session;
pub use ports::{InvoiceGatewayPort, SheetLoggerPort};
pub use error::InvoiceError;
