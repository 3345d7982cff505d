//! Value objects for the order flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-currency monetary amount backed by a decimal, so price and
/// discount arithmetic stays exact at the cent level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `qty` units at this unit price.
    pub fn times(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }

    /// Portion of this amount given a fraction such as `0.10`.
    pub fn fraction(&self, fraction: Decimal) -> Money {
        Money(self.0 * fraction)
    }

    pub fn minus(&self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity, always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Customer name, trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Promo code normalized for lookup: surrounding whitespace stripped and
/// uppercased. A submission that is empty after trimming means "no promo
/// requested", so `normalize` returns `None` rather than an invalid code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoCodeInput(String);

impl PromoCodeInput {
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromoCodeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_times() {
        let price = Money::new(Decimal::new(1499, 2));
        assert_eq!(price.times(2).amount(), Decimal::new(2998, 2));
    }

    #[test]
    fn test_money_fraction_and_minus() {
        let subtotal = Money::new(Decimal::new(2998, 2));
        let discount = subtotal.fraction(Decimal::new(10, 2));
        assert_eq!(discount.amount(), Decimal::new(2998, 3));
        assert_eq!(subtotal.minus(discount).amount(), Decimal::new(26982, 3));
    }

    #[test]
    fn test_quantity_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(3).unwrap().value(), 3);
    }

    #[test]
    fn test_customer_name_trims() {
        assert_eq!(CustomerName::new("  Ada  ").unwrap().as_str(), "Ada");
        assert!(CustomerName::new("   ").is_none());
    }

    #[test]
    fn test_promo_input_normalizes() {
        let code = PromoCodeInput::normalize("  welcome10 ").unwrap();
        assert_eq!(code.as_str(), "WELCOME10");
    }

    #[test]
    fn test_blank_promo_input_means_no_promo() {
        assert!(PromoCodeInput::normalize("").is_none());
        assert!(PromoCodeInput::normalize("   ").is_none());
    }
}
