//! Basket repository abstraction.

use async_trait::async_trait;

use crate::domain::basket::Basket;
use crate::error::DomainError;

/// Repository trait for loading and storing basket aggregates.
///
/// Implementations load baskets with their items included and treat the
/// aggregate as one unit of storage: `update` rewrites ownership and the
/// whole item set. Failures surface as [`DomainError::Storage`] carrying
/// the backend's message; callers never see backend error types.
#[async_trait]
pub trait BasketRepository: Send + Sync {
    /// Finds the buyer's basket. When a buyer somehow owns more than one
    /// basket, the one with the lowest identity is returned.
    async fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Basket>, DomainError>;

    /// Finds a basket by its identity.
    async fn find_by_id(&self, basket_id: i64) -> Result<Option<Basket>, DomainError>;

    /// Persists a new basket and returns it with its assigned identity.
    async fn add(&self, basket: Basket) -> Result<Basket, DomainError>;

    /// Rewrites a persisted basket. Returns the number of baskets updated,
    /// 0 when the basket does not exist or was never persisted.
    async fn update(&self, basket: &Basket) -> Result<u64, DomainError>;

    /// Deletes a persisted basket. Returns the number of baskets deleted.
    async fn delete(&self, basket: &Basket) -> Result<u64, DomainError>;

    /// Counts all persisted baskets.
    async fn count(&self) -> Result<u64, DomainError>;
}
