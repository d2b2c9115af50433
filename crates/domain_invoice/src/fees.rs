//! Fee stacking
//!
//! Totals are a pure function of the four entered amounts and the three
//! fee toggles. The order is fixed:
//!
//! ```text
//! base        = max(0, subtotal - discount - cash - deposit)
//! taxes       = base * 7%
//! net         = base + taxes
//! financing   = net * 10%          (when toggled)
//! delivery    = 100                (when toggled)
//! laboratory  = 150                (when toggled)
//! final_total = net + financing + delivery + laboratory
//! ```
//!
//! Deductions come off before tax, and financing is charged on the taxed
//! amount. Flat fees never compound with each other or with financing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

/// Sales tax rate applied to the base amount
pub const TAX_RATE: Decimal = dec!(0.07);

/// Financing charge applied to the taxed amount
pub const FINANCING_RATE: Decimal = dec!(0.10);

/// Flat medication delivery fee
pub const DELIVERY_FEE: Decimal = dec!(100);

/// Flat laboratory exams fee
pub const LABORATORY_FEE: Decimal = dec!(150);

/// The four amounts entered at the front desk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceInputs {
    pub subtotal: Money,
    pub discount: Money,
    pub cash: Money,
    pub deposit: Money,
}

impl InvoiceInputs {
    /// Creates inputs from decimal amounts
    pub fn new(subtotal: Decimal, discount: Decimal, cash: Decimal, deposit: Decimal) -> Self {
        Self {
            subtotal: Money::new(subtotal),
            discount: Money::new(discount),
            cash: Money::new(cash),
            deposit: Money::new(deposit),
        }
    }

    /// Subtotal minus every deduction, floored at zero
    pub fn base_amount(&self) -> Money {
        (self.subtotal - self.discount - self.cash - self.deposit).non_negative()
    }
}

/// Optional charges switched on per invoice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeToggles {
    #[serde(default)]
    pub apply_financing: bool,
    #[serde(default)]
    pub apply_delivery: bool,
    #[serde(default)]
    pub apply_laboratory: bool,
}

/// Rates and flat fees used to stack the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub tax_rate: Rate,
    pub financing_rate: Rate,
    pub delivery_fee: Money,
    pub laboratory_fee: Money,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            tax_rate: Rate::new(TAX_RATE),
            financing_rate: Rate::new(FINANCING_RATE),
            delivery_fee: Money::new(DELIVERY_FEE),
            laboratory_fee: Money::new(LABORATORY_FEE),
        }
    }
}

impl FeeSchedule {
    /// Computes every intermediate and final amount
    ///
    /// No rounding is applied; amounts are rounded to cents only for display.
    pub fn compute(&self, inputs: &InvoiceInputs, toggles: &FeeToggles) -> ComputedTotals {
        let base_amount = inputs.base_amount();
        let taxes = self.tax_rate.apply(&base_amount);
        let net_subtotal = base_amount + taxes;

        let financing_fee = if toggles.apply_financing {
            self.financing_rate.apply(&net_subtotal)
        } else {
            Money::zero()
        };
        let delivery_fee = if toggles.apply_delivery {
            self.delivery_fee
        } else {
            Money::zero()
        };
        let laboratory_fee = if toggles.apply_laboratory {
            self.laboratory_fee
        } else {
            Money::zero()
        };

        ComputedTotals {
            base_amount,
            taxes,
            net_subtotal,
            financing_fee,
            delivery_fee,
            laboratory_fee,
            final_total: net_subtotal + financing_fee + delivery_fee + laboratory_fee,
        }
    }
}

/// Derived amounts for one set of inputs and toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedTotals {
    pub base_amount: Money,
    pub taxes: Money,
    pub net_subtotal: Money,
    pub financing_fee: Money,
    pub delivery_fee: Money,
    pub laboratory_fee: Money,
    pub final_total: Money,
}

/// Computes totals with the standard fee schedule
pub fn compute_totals(inputs: &InvoiceInputs, toggles: &FeeToggles) -> ComputedTotals {
    FeeSchedule::default().compute(inputs, toggles)
}
