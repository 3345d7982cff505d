//! Store seams between the order flow and persistence.
//!
//! The workflow only ever talks to these traits; `PgStore` backs the
//! running service and `MemoryStore` backs tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Order, Pizza, PromoCode};
use crate::error::Result;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Joined order + pizza + optional promo, as the confirmation view needs it.
#[derive(Clone, Debug)]
pub struct OrderRecord {
    pub order: Order,
    pub pizza: Pizza,
    pub promo: Option<PromoCode>,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All pizzas, in stable id order.
    async fn list_pizzas(&self) -> Result<Vec<Pizza>>;
}

#[async_trait]
pub trait PromoStore: Send + Sync {
    /// Looks up a promo by its normalized (uppercase) code. Read-only.
    async fn find_by_code(&self, normalized_code: &str) -> Result<Option<PromoCode>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists the order atomically. When the order references a promo,
    /// the promo's usage counter is incremented in the same transaction,
    /// conditional on `times_used` still being under the cap; if the cap
    /// was reached since validation, the insert is rolled back and the
    /// submission fails as a late `InvalidPromo`.
    async fn insert(&self, order: &Order) -> Result<Uuid>;

    async fn find_with_joins(&self, order_id: Uuid) -> Result<Option<OrderRecord>>;
}
