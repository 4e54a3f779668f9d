//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No basket exists with the given identity.
    #[error("basket not found: {0}")]
    BasketNotFound(i64),

    /// The buyer has no basket.
    #[error("no basket for buyer: {0}")]
    NoBasketForBuyer(String),

    /// A storage failure, passed through from the repository unchanged.
    #[error("storage error: {0}")]
    Storage(String),
}
