//! Text input handling for amounts and invoice numbers
//!
//! Amount fields only ever hold text that is a valid partial unsigned
//! decimal: keystrokes that would break the pattern are discarded and the
//! previous text is kept. The numeric value used downstream is `0` for
//! blank or unparseable text.

use std::str::FromStr;

use core_kernel::Money;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// Number of digits in a formatted invoice number
pub const INVOICE_NUMBER_DIGITS: usize = 6;

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("amount pattern is a valid regex"));

/// Returns true if `text` is an acceptable (possibly partial) amount
pub fn is_partial_amount(text: &str) -> bool {
    AMOUNT_PATTERN.is_match(text)
}

/// Parses amount text into a non-negative dollar amount
///
/// Blank text, a lone `.`, and anything outside the unsigned decimal
/// pattern all read as zero. A trailing or leading point is tolerated:
/// `"5."` is 5 and `".5"` is 0.5.
pub fn parse_amount(text: &str) -> Money {
    let text = text.trim();
    if !is_partial_amount(text) {
        return Money::zero();
    }

    let normalized = match text {
        "" | "." => return Money::zero(),
        t if t.starts_with('.') => format!("0{t}"),
        t => t.trim_end_matches('.').to_string(),
    };

    Decimal::from_str(&normalized)
        .map(Money::new)
        .unwrap_or_default()
}

/// One editable amount field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountField {
    text: String,
}

impl AmountField {
    /// Offers new text to the field
    ///
    /// Returns false and keeps the previous text when `text` is not a valid
    /// partial amount.
    pub fn accept(&mut self, text: &str) -> bool {
        if is_partial_amount(text) {
            self.text = text.to_string();
            true
        } else {
            false
        }
    }

    /// Returns the raw text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the parsed amount
    pub fn value(&self) -> Money {
        parse_amount(&self.text)
    }
}

/// The invoice number typed at confirmation
///
/// Holds at most six ASCII digits. Non-digits are stripped as they are
/// typed, and input that would exceed six digits is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceNumberField {
    digits: String,
}

impl InvoiceNumberField {
    /// Offers new text to the field
    pub fn accept(&mut self, text: &str) -> bool {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() <= INVOICE_NUMBER_DIGITS {
            self.digits = digits;
            true
        } else {
            false
        }
    }

    /// Left-pads a non-empty value with zeros to six digits
    pub fn format(&mut self) {
        if !self.digits.is_empty() {
            self.digits = format!("{:0>width$}", self.digits, width = INVOICE_NUMBER_DIGITS);
        }
    }

    /// Returns the digits as typed or formatted
    pub fn value(&self) -> &str {
        &self.digits
    }

    /// Returns true if nothing has been entered
    pub fn is_blank(&self) -> bool {
        self.digits.trim().is_empty()
    }
}
