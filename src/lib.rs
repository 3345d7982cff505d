//! Pizzeria order-taking service.
//!
//! Lists pizzas, accepts an order with an optional promotional discount
//! code, persists it, and prices a confirmation.
//!
//! ## Features
//! - Pizza menu with decimal prices
//! - Promo codes with validity windows and usage caps
//! - Order submission workflow with atomic usage-counter enforcement
//! - Priced confirmation read-back

pub mod domain;
pub mod error;
pub mod store;
pub mod workflow;

pub use error::{OrderFlowError, Result};
pub use workflow::{OrderForm, OrderSummary, OrderWorkflow};
