//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of US dollar amounts
//! using rust_decimal, so fee stacking never accumulates binary
//! floating-point drift. Amounts keep full precision through every
//! intermediate step and are rounded to cents only when displayed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Number of decimal places shown for dollar amounts
pub const CENT_PLACES: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,
}

/// A US dollar amount
///
/// On the JSON wire a `Money` is a plain number, matching what the
/// spreadsheet logger and the invoicing platform exchange. It deserializes
/// from either a number or a numeric string.
///
/// The `+`, `-` and `*` operators saturate at the `Decimal` bounds rather
/// than panic; use `checked_add`/`checked_sub` to detect overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value without rounding
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Creates Money from an integer amount of cents
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, CENT_PLACES))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs())
    }

    /// Clamps negative amounts to zero
    pub fn non_negative(&self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            *self
        }
    }

    /// Rounds to whole cents, halves away from zero
    ///
    /// This is the rounding browsers apply when formatting currency, so the
    /// printed totals match what the front desk has always seen.
    pub fn round_to_cents(&self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Checked addition that reports overflow instead of panicking
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction that reports overflow instead of panicking
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_sub(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a scalar (e.g., for rate calculations)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount.saturating_mul(factor))
    }

    /// Formats the amount the way `en-US` currency formatting does:
    /// `$1,234.50`, `-$5.00`
    pub fn format_usd(&self) -> String {
        let rounded = self.round_to_cents().amount;
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        format!("{sign}${grouped}.{cents}")
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_usd())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount.saturating_add(other.amount))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount.saturating_sub(other.amount))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.amount.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} cannot be represented as a JSON number",
                self.amount
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

/// Represents a percentage rate (e.g., sales tax, financing charge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.07 for 7%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.07 for 7%)
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 7 for 7%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_keeps_precision() {
        let m = Money::new(dec!(45.5012345));
        assert_eq!(m.amount(), dec!(45.5012345));
    }

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((b - a).non_negative(), Money::zero());
    }

    #[test]
    fn test_operators_saturate_instead_of_overflowing() {
        let max = Money::new(Decimal::MAX);

        assert_eq!(max + Money::new(dec!(1)), max);
        assert_eq!(-max - Money::new(dec!(1)), -max);
        assert_eq!(max * dec!(2), max);
        assert_eq!(max.checked_add(&Money::new(dec!(1))), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_deserializes_from_number_or_string() {
        let from_number: Money = serde_json::from_str("1015.05").unwrap();
        let from_string: Money = serde_json::from_str("\"1015.05\"").unwrap();

        assert_eq!(from_number.amount(), dec!(1015.05));
        assert_eq!(from_string.amount(), dec!(1015.05));
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "1015.05");
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(7));
        let amount = Money::new(dec!(650));

        assert_eq!(rate.apply(&amount).amount(), dec!(45.50));
        assert_eq!(rate.to_string(), "7%");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(Money::new(dec!(1015.05)).format_usd(), "$1,015.05");
        assert_eq!(Money::new(dec!(1234567.891)).format_usd(), "$1,234,567.89");
        assert_eq!(Money::zero().format_usd(), "$0.00");
        assert_eq!(Money::new(dec!(-5)).format_usd(), "-$5.00");
    }
}
