//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_invoice::{Calculator, ComputedTotals, Notice, NoticeLevel};
use rust_decimal::Decimal;

/// Asserts that a Money value equals an exact decimal amount
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual.amount(),
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money.amount());
}

/// Asserts that the totals add up the way fees stack
pub fn assert_totals_consistent(totals: &ComputedTotals) {
    assert_eq!(
        totals.net_subtotal,
        totals.base_amount + totals.taxes,
        "Net subtotal {} is not base {} plus taxes {}",
        totals.net_subtotal.amount(),
        totals.base_amount.amount(),
        totals.taxes.amount()
    );
    assert_eq!(
        totals.final_total,
        totals.net_subtotal + totals.financing_fee + totals.delivery_fee + totals.laboratory_fee,
        "Final total {} does not stack the fees",
        totals.final_total.amount()
    );
    assert!(
        !totals.final_total.is_negative(),
        "Final total went negative: {}",
        totals.final_total.amount()
    );
}

/// Asserts that exactly one notice of `level` was raised and returns its message
pub fn assert_single_notice(notices: &[Notice], level: NoticeLevel) -> String {
    let matching: Vec<&Notice> = notices.iter().filter(|n| n.level == level).collect();
    assert_eq!(
        matching.len(),
        1,
        "Expected one {:?} notice, got {:?}",
        level,
        notices
    );
    matching[0].message.clone()
}

/// Drains the calculator's notices and asserts one carries `message`
pub fn assert_notice(calc: &mut Calculator, level: NoticeLevel, message: &str) {
    let notices = calc.take_notices();
    assert!(
        notices.iter().any(|n| n.level == level && n.message == message),
        "Expected {:?} notice {:?}, got {:?}",
        level,
        message,
        notices
    );
}
