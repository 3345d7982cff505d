//! Aggregates module
pub mod order;
pub mod pizza;
pub mod promo;

pub use order::Order;
pub use pizza::Pizza;
pub use promo::PromoCode;
