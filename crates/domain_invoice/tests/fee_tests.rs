//! Fee Stacking Tests
//!
//! Worked examples and properties for the fee calculator:
//! - Base amount floors at zero after deductions
//! - Tax is charged on the base, financing on the taxed amount
//! - Flat fees add without compounding
//!
//! # Test Organization
//!
//! - `example_tests` - The reference invoice worked through step by step
//! - `property_tests` - proptest properties over arbitrary amounts

use domain_invoice::fees::{FINANCING_RATE, TAX_RATE};
use domain_invoice::{compute_totals, Calculator, FeeToggles, InvoiceInputs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    assert_money_eq, assert_totals_consistent, InputFixtures, TemporalFixtures, ToggleFixtures,
};

// ============================================================================
// EXAMPLE TESTS
// ============================================================================

mod example_tests {
    use super::*;

    #[test]
    fn test_reference_invoice_without_fees() {
        let totals = compute_totals(&InputFixtures::standard(), &ToggleFixtures::none());

        assert_money_eq(totals.base_amount, dec!(650));
        assert_money_eq(totals.taxes, dec!(45.50));
        assert_money_eq(totals.net_subtotal, dec!(695.50));
        assert_money_eq(totals.final_total, dec!(695.50));
    }

    #[test]
    fn test_reference_invoice_with_financing() {
        let totals = compute_totals(&InputFixtures::standard(), &ToggleFixtures::financing_only());

        assert_money_eq(totals.financing_fee, dec!(69.55));
        assert_money_eq(totals.final_total, dec!(765.05));
    }

    #[test]
    fn test_reference_invoice_with_every_fee() {
        let totals = compute_totals(&InputFixtures::standard(), &ToggleFixtures::all());

        assert_money_eq(totals.delivery_fee, dec!(100));
        assert_money_eq(totals.laboratory_fee, dec!(150));
        assert_money_eq(totals.final_total, dec!(1015.05));
        assert_eq!(totals.final_total.format_usd(), "$1,015.05");
    }

    #[test]
    fn test_over_deduction_floors_base_at_zero() {
        let totals = compute_totals(&InputFixtures::over_deducted(), &ToggleFixtures::none());

        assert!(totals.base_amount.is_zero());
        assert!(totals.taxes.is_zero());
        assert!(totals.final_total.is_zero());
    }

    #[test]
    fn test_flat_fees_apply_even_on_zero_base() {
        let toggles = FeeToggles {
            apply_delivery: true,
            apply_laboratory: true,
            ..FeeToggles::default()
        };
        let totals = compute_totals(&InputFixtures::empty(), &toggles);

        assert_money_eq(totals.final_total, dec!(250));
    }

    #[test]
    fn test_financing_charged_on_taxed_amount() {
        let inputs = InvoiceInputs::new(dec!(100), dec!(0), dec!(0), dec!(0));
        let totals = compute_totals(&inputs, &ToggleFixtures::financing_only());

        // 100 * 1.07 * 0.10, not 100 * 0.10
        assert_money_eq(totals.financing_fee, dec!(10.70));
    }

    #[test]
    fn test_precision_kept_until_display() {
        let inputs = InvoiceInputs::new(dec!(0.15), dec!(0), dec!(0), dec!(0));
        let totals = compute_totals(&inputs, &ToggleFixtures::none());

        assert_money_eq(totals.taxes, dec!(0.0105));
        assert_eq!(totals.taxes.to_string(), "$0.01");
    }

    #[test]
    fn test_largest_accepted_amount_saturates() {
        let mut calc = Calculator::new();
        assert!(calc.set_subtotal("79228162514264337593543950335"));
        calc.set_financing(true);
        calc.set_delivery(true);
        calc.set_laboratory(true);

        let totals = calc.totals();
        assert_eq!(totals.base_amount.amount(), Decimal::MAX);
        assert_eq!(totals.final_total.amount(), Decimal::MAX);

        calc.request_calculation();
        calc.set_client_name("Ana Ruiz");
        assert!(calc.confirm(TemporalFixtures::confirmed_at()).is_ok());
        assert_eq!(calc.display_total().amount(), Decimal::MAX);
    }
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{inputs_strategy, toggles_strategy};

    proptest! {
        #[test]
        fn base_is_floored_difference(inputs in inputs_strategy()) {
            let totals = compute_totals(&inputs, &FeeToggles::default());
            let expected = (inputs.subtotal.amount()
                - inputs.discount.amount()
                - inputs.cash.amount()
                - inputs.deposit.amount())
            .max(Decimal::ZERO);

            prop_assert_eq!(totals.base_amount.amount(), expected);
        }

        #[test]
        fn taxes_are_seven_percent_of_base(inputs in inputs_strategy()) {
            let totals = compute_totals(&inputs, &FeeToggles::default());
            prop_assert_eq!(totals.taxes.amount(), totals.base_amount.amount() * TAX_RATE);
        }

        #[test]
        fn totals_always_stack(inputs in inputs_strategy(), toggles in toggles_strategy()) {
            assert_totals_consistent(&compute_totals(&inputs, &toggles));
        }

        #[test]
        fn turning_a_fee_off_never_raises_the_total(
            inputs in inputs_strategy(),
            toggles in toggles_strategy(),
            which in 0usize..3,
        ) {
            let mut on = toggles;
            let mut off = toggles;
            match which {
                0 => { on.apply_financing = true; off.apply_financing = false; }
                1 => { on.apply_delivery = true; off.apply_delivery = false; }
                _ => { on.apply_laboratory = true; off.apply_laboratory = false; }
            }

            let with_fee = compute_totals(&inputs, &on).final_total;
            let without_fee = compute_totals(&inputs, &off).final_total;
            prop_assert!(without_fee <= with_fee);
            if which != 0 || !compute_totals(&inputs, &off).base_amount.is_zero() {
                prop_assert!(without_fee < with_fee);
            }
        }

        #[test]
        fn fee_order_does_not_matter(inputs in inputs_strategy(), toggles in toggles_strategy()) {
            // Reach the same toggle set by flipping in two different orders
            let mut forward = FeeToggles::default();
            forward.apply_financing = toggles.apply_financing;
            forward.apply_delivery = toggles.apply_delivery;
            forward.apply_laboratory = toggles.apply_laboratory;

            let mut backward = FeeToggles::default();
            backward.apply_laboratory = toggles.apply_laboratory;
            backward.apply_delivery = toggles.apply_delivery;
            backward.apply_financing = toggles.apply_financing;

            let totals = compute_totals(&inputs, &forward);
            prop_assert_eq!(totals, compute_totals(&inputs, &backward));

            let fees = totals.financing_fee + totals.delivery_fee + totals.laboratory_fee;
            let reversed = totals.laboratory_fee + totals.delivery_fee + totals.financing_fee;
            prop_assert_eq!(totals.net_subtotal + fees, totals.net_subtotal + reversed);
        }

        #[test]
        fn financing_is_ten_percent_of_net(inputs in inputs_strategy()) {
            let toggles = FeeToggles { apply_financing: true, ..FeeToggles::default() };
            let totals = compute_totals(&inputs, &toggles);
            prop_assert_eq!(
                totals.financing_fee.amount(),
                totals.net_subtotal.amount() * FINANCING_RATE
            );
        }
    }
}
