//! Order aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{CustomerName, Quantity};

/// A placed order. Created exactly once per successful submission and
/// immutable thereafter; references its pizza and optional promo by id only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub pizza_id: Uuid,
    pub quantity: Quantity,
    pub customer_name: CustomerName,
    pub placed_at: DateTime<Utc>,
    pub promo_code_id: Option<Uuid>,
}

impl Order {
    /// Builds a new order record with a fresh identifier, ready to persist.
    pub fn place(
        pizza_id: Uuid,
        quantity: Quantity,
        customer_name: CustomerName,
        placed_at: DateTime<Utc>,
        promo_code_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            pizza_id,
            quantity,
            customer_name,
            placed_at,
            promo_code_id,
        }
    }
}
