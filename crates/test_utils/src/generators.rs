//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating amounts, field text, and
//! fee toggles the way a front-desk user would produce them.

use domain_invoice::{FeeToggles, InvoiceInputs, Location};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative amounts with up to two decimals (0 to 100,000.00)
pub fn amount_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for amounts with more precision than cents
pub fn precise_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64, 0u32..6u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for the four entered amounts
pub fn inputs_strategy() -> impl Strategy<Value = InvoiceInputs> {
    (
        amount_decimal_strategy(),
        amount_decimal_strategy(),
        amount_decimal_strategy(),
        amount_decimal_strategy(),
    )
        .prop_map(|(subtotal, discount, cash, deposit)| {
            InvoiceInputs::new(subtotal, discount, cash, deposit)
        })
}

/// Strategy for fee toggle combinations
pub fn toggles_strategy() -> impl Strategy<Value = FeeToggles> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(apply_financing, apply_delivery, apply_laboratory)| FeeToggles {
            apply_financing,
            apply_delivery,
            apply_laboratory,
        },
    )
}

/// Strategy for a location
pub fn location_strategy() -> impl Strategy<Value = Location> {
    prop_oneof![Just(Location::Royal), Just(Location::Lales)]
}

/// Strategy for text an amount field accepts: digits with at most one point
pub fn amount_text_strategy() -> impl Strategy<Value = String> {
    "[0-9]{0,7}(\\.[0-9]{0,4})?"
}

/// Strategy for text an amount field rejects
pub fn invalid_amount_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{0,3}\\.[0-9]{0,3}\\.[0-9]{0,3}",
        "[0-9]{0,3}[a-zA-Z,$ -][0-9]{0,3}",
    ]
}

/// Strategy for whatever might be typed into the invoice number field
pub fn invoice_number_text_strategy() -> impl Strategy<Value = String> {
    "[0-9a-zA-Z -]{0,10}"
}
