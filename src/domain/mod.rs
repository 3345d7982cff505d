//! Domain model: aggregates, value objects and the pricing engine.

pub mod aggregates;
pub mod pricing;
pub mod value_objects;

pub use aggregates::{Order, Pizza, PromoCode};
pub use pricing::{price, Receipt};
pub use value_objects::{CustomerName, Money, PromoCodeInput, Quantity};
