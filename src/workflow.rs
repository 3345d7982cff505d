//! Order workflow: `Received → Validated → Persisted → Finalized`, or
//! `Rejected` at any gate before persistence.
//!
//! The workflow owns the transition rules; persistence atomicity lives in
//! the [`OrderStore`] implementations. An order rejected at a gate never
//! touches storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pricing;
use crate::domain::{CustomerName, Money, Order, PromoCode, PromoCodeInput, Quantity};
use crate::error::{OrderFlowError, Result};
use crate::store::{OrderRecord, OrderStore, PromoStore};

/// Raw submission fields, all optional at the boundary so the workflow owns
/// the missing-field gate.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrderForm {
    pub pizza_id: Option<Uuid>,
    pub quantity: Option<u32>,
    pub customer_name: Option<String>,
    pub promo_code: Option<String>,
}

/// Fully priced confirmation record handed to the presentation layer.
#[derive(Clone, Debug, Serialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub pizza_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
    pub promo_code: Option<String>,
    pub discount_percent: Option<Decimal>,
    pub customer_name: String,
    pub placed_at: DateTime<Utc>,
    pub display_time: String,
}

impl OrderSummary {
    fn from_record(record: OrderRecord) -> Self {
        let OrderRecord {
            order,
            pizza,
            promo,
        } = record;
        let receipt = pricing::price(pizza.price, order.quantity, promo.as_ref());
        Self {
            order_id: order.id,
            pizza_name: pizza.name,
            unit_price: pizza.price,
            quantity: order.quantity.value(),
            subtotal: receipt.subtotal,
            discount_amount: receipt.discount_amount,
            total: receipt.total,
            promo_code: promo.as_ref().map(|p| p.code.clone()),
            discount_percent: promo.as_ref().map(|p| p.discount_percent),
            customer_name: order.customer_name.to_string(),
            placed_at: order.placed_at,
            display_time: order.placed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Decides whether a submitted code may be applied at `now`.
///
/// An input that is empty after trimming means "no promo requested" and
/// yields `Ok(None)`. A non-empty input must resolve to an accepted code or
/// the whole lookup fails as [`OrderFlowError::InvalidPromo`]; unknown,
/// out-of-window and exhausted codes are deliberately indistinguishable.
/// Read-only: usage is incremented later, by the persist step.
pub async fn validate_promo<S: PromoStore + ?Sized>(
    store: &S,
    raw_code: &str,
    now: DateTime<Utc>,
) -> Result<Option<PromoCode>> {
    let Some(code) = PromoCodeInput::normalize(raw_code) else {
        return Ok(None);
    };
    let promo = store
        .find_by_code(code.as_str())
        .await?
        .filter(|p| p.accepts(now))
        .ok_or(OrderFlowError::InvalidPromo)?;
    Ok(Some(promo))
}

pub struct OrderWorkflow<S> {
    store: S,
}

impl<S> OrderWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> OrderWorkflow<S>
where
    S: PromoStore + OrderStore,
{
    /// Runs the submission workflow against the current wall clock.
    pub async fn submit(&self, form: OrderForm) -> Result<Uuid> {
        self.submit_at(form, Utc::now()).await
    }

    /// Submission with an explicit clock reading, for deterministic tests.
    pub async fn submit_at(&self, form: OrderForm, now: DateTime<Utc>) -> Result<Uuid> {
        // Received: every required field present and non-empty, or the
        // workflow aborts before any store access.
        let pizza_id = form
            .pizza_id
            .ok_or(OrderFlowError::MissingField("pizza_id"))?;
        let quantity = form
            .quantity
            .and_then(Quantity::new)
            .ok_or(OrderFlowError::MissingField("quantity"))?;
        let customer_name = form
            .customer_name
            .and_then(CustomerName::new)
            .ok_or(OrderFlowError::MissingField("customer_name"))?;

        // Validated: a supplied promo code must be accepted; a blank one
        // means the order simply carries no promo.
        let promo = match form.promo_code.as_deref() {
            Some(raw) => validate_promo(&self.store, raw, now).await?,
            None => None,
        };

        // Persisted + Finalized: insert and conditional usage increment
        // share one storage transaction.
        let order = Order::place(
            pizza_id,
            quantity,
            customer_name,
            now,
            promo.as_ref().map(|p| p.id),
        );
        let order_id = self.store.insert(&order).await?;
        tracing::info!(
            %order_id,
            promo_code = promo.as_ref().map(|p| p.code.as_str()),
            "order persisted"
        );
        Ok(order_id)
    }

    /// Fetches the joined order record and prices it for display.
    pub async fn confirmation(&self, order_id: Uuid) -> Result<OrderSummary> {
        let record = self
            .store
            .find_with_joins(order_id)
            .await?
            .ok_or(OrderFlowError::NotFound)?;
        Ok(OrderSummary::from_record(record))
    }
}
