//! Fee calculation DTOs

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_invoice::{parse_amount, ComputedTotals, FeeToggles, InvoiceInputs};

/// Amounts as typed at the front desk, plus the fee toggles
///
/// Amount text that does not read as a number counts as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculateRequest {
    pub subtotal: String,
    pub discount: String,
    pub cash: String,
    pub deposit: String,
    #[serde(flatten)]
    pub toggles: FeeToggles,
}

impl CalculateRequest {
    pub fn inputs(&self) -> InvoiceInputs {
        InvoiceInputs {
            subtotal: parse_amount(&self.subtotal),
            discount: parse_amount(&self.discount),
            cash: parse_amount(&self.cash),
            deposit: parse_amount(&self.deposit),
        }
    }
}

/// Every computed amount rendered for display
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub base_amount: String,
    pub taxes: String,
    pub net_subtotal: String,
    pub financing_fee: String,
    pub delivery_fee: String,
    pub laboratory_fee: String,
    pub final_total: String,
}

impl From<&ComputedTotals> for FormattedTotals {
    fn from(totals: &ComputedTotals) -> Self {
        let fmt = |m: Money| m.format_usd();
        Self {
            base_amount: fmt(totals.base_amount),
            taxes: fmt(totals.taxes),
            net_subtotal: fmt(totals.net_subtotal),
            financing_fee: fmt(totals.financing_fee),
            delivery_fee: fmt(totals.delivery_fee),
            laboratory_fee: fmt(totals.laboratory_fee),
            final_total: fmt(totals.final_total),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub inputs: InvoiceInputs,
    pub toggles: FeeToggles,
    pub totals: ComputedTotals,
    pub formatted: FormattedTotals,
}
