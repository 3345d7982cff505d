//! Postgres-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{CustomerName, Money, Order, Pizza, PromoCode, Quantity};
use crate::error::{OrderFlowError, Result};
use crate::store::{CatalogStore, OrderRecord, OrderStore, PromoStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PizzaRow {
    id: Uuid,
    name: String,
    price: Decimal,
}

impl From<PizzaRow> for Pizza {
    fn from(r: PizzaRow) -> Self {
        Pizza::new(r.id, r.name, Money::new(r.price))
    }
}

#[derive(sqlx::FromRow)]
struct PromoRow {
    id: Uuid,
    code: String,
    discount_percent: Decimal,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    usage_limit: Option<i64>,
    times_used: i64,
}

impl From<PromoRow> for PromoCode {
    fn from(r: PromoRow) -> Self {
        PromoCode {
            id: r.id,
            code: r.code,
            discount_percent: r.discount_percent,
            start_date: r.start_date,
            end_date: r.end_date,
            usage_limit: r.usage_limit,
            times_used: r.times_used,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderJoinRow {
    id: Uuid,
    pizza_id: Uuid,
    quantity: i32,
    customer_name: String,
    placed_at: DateTime<Utc>,
    promo_code_id: Option<Uuid>,
    pizza_name: String,
    pizza_price: Decimal,
    promo_code: Option<String>,
    promo_discount: Option<Decimal>,
    promo_start: Option<DateTime<Utc>>,
    promo_end: Option<DateTime<Utc>>,
    promo_limit: Option<i64>,
    promo_used: Option<i64>,
}

impl OrderJoinRow {
    fn into_record(self) -> Result<OrderRecord> {
        let corrupt = |what: &str| OrderFlowError::Storage(format!("corrupt order row: {what}"));
        // The table CHECKs make these conversions infallible in practice.
        let quantity = u32::try_from(self.quantity)
            .ok()
            .and_then(Quantity::new)
            .ok_or_else(|| corrupt("quantity"))?;
        let customer_name =
            CustomerName::new(self.customer_name).ok_or_else(|| corrupt("customer_name"))?;
        let promo = match (self.promo_code_id, self.promo_code, self.promo_discount) {
            (Some(id), Some(code), Some(discount_percent)) => Some(PromoCode {
                id,
                code,
                discount_percent,
                start_date: self.promo_start.ok_or_else(|| corrupt("promo start"))?,
                end_date: self.promo_end.ok_or_else(|| corrupt("promo end"))?,
                usage_limit: self.promo_limit,
                times_used: self.promo_used.ok_or_else(|| corrupt("promo usage"))?,
            }),
            _ => None,
        };
        Ok(OrderRecord {
            order: Order {
                id: self.id,
                pizza_id: self.pizza_id,
                quantity,
                customer_name,
                placed_at: self.placed_at,
                promo_code_id: self.promo_code_id,
            },
            pizza: Pizza::new(self.pizza_id, self.pizza_name, Money::new(self.pizza_price)),
            promo,
        })
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_pizzas(&self) -> Result<Vec<Pizza>> {
        let rows =
            sqlx::query_as::<_, PizzaRow>("SELECT id, name, price FROM pizzas ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Pizza::from).collect())
    }
}

#[async_trait]
impl PromoStore for PgStore {
    async fn find_by_code(&self, normalized_code: &str) -> Result<Option<PromoCode>> {
        let row = sqlx::query_as::<_, PromoRow>(
            "SELECT id, code, discount_percent, start_date, end_date, usage_limit, times_used \
             FROM promo_codes WHERE UPPER(code) = $1",
        )
        .bind(normalized_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(PromoCode::from))
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert(&self, order: &Order) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO orders (id, pizza_id, quantity, customer_name, placed_at, promo_code_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id)
        .bind(order.pizza_id)
        .bind(order.quantity.value() as i32)
        .bind(order.customer_name.as_str())
        .bind(order.placed_at)
        .bind(order.promo_code_id)
        .execute(&mut *tx)
        .await?;

        if let Some(promo_id) = order.promo_code_id {
            // Compare-and-increment: refuses the (N+1)th use even when two
            // submissions passed validation concurrently.
            let updated = sqlx::query(
                "UPDATE promo_codes SET times_used = times_used + 1 \
                 WHERE id = $1 AND (usage_limit IS NULL OR times_used < usage_limit)",
            )
            .bind(promo_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            if updated == 0 {
                tx.rollback().await?;
                tracing::warn!(%promo_id, "promo usage cap reached at write time, order rolled back");
                return Err(OrderFlowError::InvalidPromo);
            }
        }

        tx.commit().await?;
        Ok(order.id)
    }

    async fn find_with_joins(&self, order_id: Uuid) -> Result<Option<OrderRecord>> {
        let row = sqlx::query_as::<_, OrderJoinRow>(
            "SELECT o.id, o.pizza_id, o.quantity, o.customer_name, o.placed_at, o.promo_code_id, \
                    p.name AS pizza_name, p.price AS pizza_price, \
                    pc.code AS promo_code, pc.discount_percent AS promo_discount, \
                    pc.start_date AS promo_start, pc.end_date AS promo_end, \
                    pc.usage_limit AS promo_limit, pc.times_used AS promo_used \
             FROM orders o \
             JOIN pizzas p ON p.id = o.pizza_id \
             LEFT JOIN promo_codes pc ON pc.id = o.promo_code_id \
             WHERE o.id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(OrderJoinRow::into_record).transpose()
    }
}
