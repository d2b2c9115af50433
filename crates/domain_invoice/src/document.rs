//! Printable invoice

use std::fmt;

use serde::Serialize;

use core_kernel::Money;

use crate::fees::FeeSchedule;
use crate::location::Office;
use crate::record::InvoiceRecord;

/// One line of the printed summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub amount: Money,
    /// Deductions print with a leading minus
    pub deduction: bool,
}

impl SummaryLine {
    fn charge(label: impl Into<String>, amount: Money) -> Self {
        Self { label: label.into(), amount, deduction: false }
    }

    fn deduction(label: impl Into<String>, amount: Money) -> Self {
        Self { label: label.into(), amount, deduction: true }
    }

    /// Formatted amount as printed
    pub fn display_amount(&self) -> String {
        if self.deduction {
            format!("- {}", self.amount)
        } else {
            self.amount.to_string()
        }
    }
}

/// The invoice as printed for the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
    pub office: Office,
    pub client_name: String,
    pub invoice_label: Option<String>,
    pub lines: Vec<SummaryLine>,
    pub final_total: Money,
}

impl InvoiceDocument {
    /// Lays out a confirmed record; only the fees that were applied appear
    pub fn from_record(record: &InvoiceRecord, schedule: &FeeSchedule) -> Self {
        let inputs = &record.inputs;
        let totals = &record.totals;

        let mut lines = vec![
            SummaryLine::charge("Subtotal", inputs.subtotal),
            SummaryLine::deduction("Discount", inputs.discount),
            SummaryLine::deduction("Cash", inputs.cash),
            SummaryLine::charge(format!("Taxes ({})", schedule.tax_rate), totals.taxes),
            SummaryLine::deduction("Deposit", inputs.deposit),
        ];
        if record.toggles.apply_financing {
            lines.push(SummaryLine::charge(
                format!("Aplicar Financiamiento ({})", schedule.financing_rate),
                totals.financing_fee,
            ));
        }
        if record.toggles.apply_delivery {
            lines.push(SummaryLine::charge("Delivery de Medicamentos", totals.delivery_fee));
        }
        if record.toggles.apply_laboratory {
            lines.push(SummaryLine::charge("Examenes de Laboratorios", totals.laboratory_fee));
        }

        Self {
            office: *record.location.office(),
            client_name: record.client_name.clone(),
            invoice_label: record.invoice_label(),
            lines,
            final_total: totals.final_total,
        }
    }
}

impl fmt::Display for InvoiceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.office.name)?;
        writeln!(f, "{}", self.office.address)?;
        writeln!(f, "Phone: {}", self.office.phone)?;
        match &self.invoice_label {
            Some(label) => writeln!(f, "INVOICE {label}")?,
            None => writeln!(f, "INVOICE")?,
        }
        writeln!(f)?;
        writeln!(f, "Billed to: {}", self.client_name)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{:<32}{:>16}", line.label, line.display_amount())?;
        }
        write!(f, "{:<32}{:>16}", "Total", self.final_total.to_string())
    }
}
