//! Order-flow error taxonomy.
//!
//! Every failure crossing the workflow boundary resolves to one of these
//! four kinds; the HTTP layer translates each into a status code and never
//! surfaces a raw internal fault.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderFlowError {
    /// A required submission field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The submitted promo code was not accepted. Deliberately carries no
    /// detail: "unknown", "outside validity window" and "usage exhausted"
    /// are indistinguishable to callers.
    #[error("promo code was not accepted")]
    InvalidPromo,

    /// The requested order does not exist.
    #[error("order not found")]
    NotFound,

    /// The persistence layer could not complete an operation.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrderFlowError>;
