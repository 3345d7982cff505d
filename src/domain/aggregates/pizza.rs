//! Pizza catalog entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Money;

/// A menu item. Immutable after seeding; the order flow only reads it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pizza {
    pub id: Uuid,
    pub name: String,
    pub price: Money,
}

impl Pizza {
    pub fn new(id: Uuid, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
