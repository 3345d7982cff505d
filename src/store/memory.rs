//! In-memory stores with the same transactional semantics as Postgres.
//!
//! A single mutex stands in for the database transaction: the order insert
//! and the conditional usage increment happen under one lock acquisition,
//! so the late-rejection behavior matches `PgStore`.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Order, Pizza, PromoCode};
use crate::error::{OrderFlowError, Result};
use crate::store::{CatalogStore, OrderRecord, OrderStore, PromoStore};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    pizzas: Vec<Pizza>,
    promos: Vec<PromoCode>,
    orders: Vec<Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pizza(&self, pizza: Pizza) {
        self.inner.lock().unwrap().pizzas.push(pizza);
    }

    pub fn add_promo(&self, promo: PromoCode) {
        self.inner.lock().unwrap().promos.push(promo);
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().unwrap().orders.len()
    }

    pub fn promo_times_used(&self, promo_id: Uuid) -> Option<i64> {
        self.inner
            .lock()
            .unwrap()
            .promos
            .iter()
            .find(|p| p.id == promo_id)
            .map(|p| p.times_used)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_pizzas(&self) -> Result<Vec<Pizza>> {
        let mut pizzas = self.inner.lock().unwrap().pizzas.clone();
        pizzas.sort_by_key(|p| p.id);
        Ok(pizzas)
    }
}

#[async_trait]
impl PromoStore for MemoryStore {
    async fn find_by_code(&self, normalized_code: &str) -> Result<Option<PromoCode>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .promos
            .iter()
            .find(|p| p.code.to_uppercase() == normalized_code)
            .cloned())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: &Order) -> Result<Uuid> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(promo_id) = order.promo_code_id {
            let promo = inner
                .promos
                .iter_mut()
                .find(|p| p.id == promo_id)
                .ok_or_else(|| OrderFlowError::Storage("unknown promo reference".into()))?;
            if !promo.has_uses_remaining() {
                tracing::warn!(%promo_id, "promo usage cap reached at write time, order rolled back");
                return Err(OrderFlowError::InvalidPromo);
            }
            promo.times_used += 1;
        }
        inner.orders.push(order.clone());
        Ok(order.id)
    }

    async fn find_with_joins(&self, order_id: Uuid) -> Result<Option<OrderRecord>> {
        let inner = self.inner.lock().unwrap();
        let Some(order) = inner.orders.iter().find(|o| o.id == order_id).cloned() else {
            return Ok(None);
        };
        let pizza = inner
            .pizzas
            .iter()
            .find(|p| p.id == order.pizza_id)
            .cloned()
            .ok_or_else(|| OrderFlowError::Storage("dangling pizza reference".into()))?;
        let promo = order
            .promo_code_id
            .and_then(|id| inner.promos.iter().find(|p| p.id == id).cloned());
        Ok(Some(OrderRecord {
            order,
            pizza,
            promo,
        }))
    }
}
