//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic, rounding, dollar formatting,
//! and the JSON wire representation.

use core_kernel::{Money, MoneyError, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_full_precision() {
        let m = Money::new(dec!(69.5499999));
        assert_eq!(m.amount(), dec!(69.5499999));
    }

    #[test]
    fn test_from_cents_converts_correctly() {
        assert_eq!(Money::from_cents(76505).amount(), dec!(765.05));
    }

    #[test]
    fn test_zero_is_zero() {
        let m = Money::zero();
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_subtraction_may_go_negative() {
        let m = Money::new(dec!(100)) - Money::new(dec!(250));
        assert!(m.is_negative());
        assert_eq!(m.non_negative(), Money::zero());
    }

    #[test]
    fn test_sum_of_amounts() {
        let parts = [Money::new(dec!(100)), Money::new(dec!(150)), Money::new(dec!(50))];
        let total: Money = parts.iter().sum();
        assert_eq!(total.amount(), dec!(300));
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(&Money::new(dec!(1))), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_multiply_by_rate() {
        let financing = Rate::new(dec!(0.10));
        assert_eq!(financing.apply(&Money::new(dec!(695.50))).amount(), dec!(69.55));
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.005)).round_to_cents().amount(), dec!(0.01));
        assert_eq!(Money::new(dec!(2.345)).format_usd(), "$2.35");
    }

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(Money::new(dec!(765.05)).to_string(), "$765.05");
    }

    #[test]
    fn test_exact_thousand_boundary() {
        assert_eq!(Money::new(dec!(1000)).to_string(), "$1,000.00");
        assert_eq!(Money::new(dec!(999.999)).to_string(), "$1,000.00");
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(Money::new(dec!(-0.001)).format_usd(), "$0.00");
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::new(dec!(1015.05))).unwrap();
        assert_eq!(json, "1015.05");
    }

    #[test]
    fn test_deserializes_from_number_and_string() {
        let from_number: Money = serde_json::from_str("300").unwrap();
        let from_string: Money = serde_json::from_str("\"69.55\"").unwrap();

        assert_eq!(from_number.amount(), dec!(300));
        assert_eq!(from_string.amount(), dec!(69.55));
    }

    #[test]
    fn test_fractional_number_round_trips_exactly() {
        let m: Money = serde_json::from_str("69.55").unwrap();
        assert_eq!(m.amount(), dec!(69.55));
    }
}
