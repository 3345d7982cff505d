//! Promo code aggregate.
//!
//! Acceptance is a pure decision over the stored record and a clock reading:
//! the validity window is inclusive at both ends and compared as real
//! timestamps, and a usage cap of `N` admits a code only while `times_used`
//! is strictly below `N`. The usage counter itself is mutated only by the
//! store's conditional increment, never here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: Uuid,
    /// Stored uppercase; lookups normalize submissions to match.
    pub code: String,
    /// Discount fraction in (0, 1].
    pub discount_percent: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: Option<i64>,
    pub times_used: i64,
}

impl PromoCode {
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    pub fn has_uses_remaining(&self) -> bool {
        self.usage_limit.map_or(true, |cap| self.times_used < cap)
    }

    /// Whether this code may be applied at `now`. Side-effect free.
    pub fn accepts(&self, now: DateTime<Utc>) -> bool {
        self.in_window(now) && self.has_uses_remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn promo(usage_limit: Option<i64>, times_used: i64) -> PromoCode {
        PromoCode {
            id: Uuid::now_v7(),
            code: "WELCOME10".into(),
            discount_percent: Decimal::new(10, 2),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
            usage_limit,
            times_used,
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let p = promo(None, 0);
        assert!(p.accepts(p.start_date));
        assert!(p.accepts(p.end_date));
        assert!(!p.accepts(p.start_date - chrono::Duration::seconds(1)));
        assert!(!p.accepts(p.end_date + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_usage_cap() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(promo(Some(150), 149).accepts(now));
        assert!(!promo(Some(150), 150).accepts(now));
        assert!(promo(None, 1_000_000).accepts(now));
    }

    #[test]
    fn test_accepts_is_pure() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let p = promo(Some(10), 3);
        assert_eq!(p.accepts(now), p.accepts(now));
        assert_eq!(p.times_used, 3);
    }
}
