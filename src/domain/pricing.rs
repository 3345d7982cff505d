//! Order pricing engine.
//!
//! Pure function over decimal money: no rounding beyond the natural
//! precision of the decimal type, no persistence access.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::PromoCode;
use crate::domain::value_objects::{Money, Quantity};

/// Computed totals for an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
}

/// Prices `quantity` units at `unit_price`, applying the promo's discount
/// fraction when one is present and positive.
pub fn price(unit_price: Money, quantity: Quantity, promo: Option<&PromoCode>) -> Receipt {
    let subtotal = unit_price.times(quantity.value());
    let discount_amount = match promo {
        Some(p) if p.discount_percent > Decimal::ZERO => subtotal.fraction(p.discount_percent),
        _ => Money::zero(),
    };
    Receipt {
        subtotal,
        discount_amount,
        total: subtotal.minus(discount_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn welcome10() -> PromoCode {
        PromoCode {
            id: Uuid::now_v7(),
            code: "WELCOME10".into(),
            discount_percent: Decimal::new(10, 2),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
            usage_limit: None,
            times_used: 0,
        }
    }

    #[test]
    fn test_no_promo_totals() {
        let r = price(
            Money::new(Decimal::new(1299, 2)),
            Quantity::new(3).unwrap(),
            None,
        );
        assert_eq!(r.subtotal.amount(), Decimal::new(3897, 2));
        assert_eq!(r.discount_amount.amount(), Decimal::ZERO);
        assert_eq!(r.total, r.subtotal);
    }

    // 14.99 x 2 with WELCOME10 (10%): 29.98 / 2.998 / 26.982.
    #[test]
    fn test_welcome10_scenario() {
        let promo = welcome10();
        let r = price(
            Money::new(Decimal::new(1499, 2)),
            Quantity::new(2).unwrap(),
            Some(&promo),
        );
        assert_eq!(r.subtotal.amount(), Decimal::new(2998, 2));
        assert_eq!(r.discount_amount.amount(), Decimal::new(2998, 3));
        assert_eq!(r.total.amount(), Decimal::new(26982, 3));
    }

    #[test]
    fn test_discount_plus_total_reconstructs_subtotal() {
        let promo = PromoCode {
            discount_percent: Decimal::new(20, 2),
            ..welcome10()
        };
        let r = price(
            Money::new(Decimal::new(1599, 2)),
            Quantity::new(5).unwrap(),
            Some(&promo),
        );
        assert_eq!(
            r.total.amount() + r.discount_amount.amount(),
            r.subtotal.amount()
        );
        assert_eq!(
            r.total.amount(),
            r.subtotal.amount() * (Decimal::ONE - promo.discount_percent)
        );
    }
}
