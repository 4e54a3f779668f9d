//! Test repositories: fake `BasketRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storefront_basket::domain::basket::Basket;
use storefront_basket::error::DomainError;
use storefront_basket::repository::BasketRepository;

/// A basket repository backed by a `Vec` behind a mutex. Behaves like the
/// real adapter: `add` hands out sequential identities (unless the basket
/// already carries one), `update` rewrites a stored basket wholesale, and
/// lookups by buyer return the basket with the lowest identity.
#[derive(Debug, Default)]
pub struct InMemoryBasketRepository {
    baskets: Mutex<Vec<Basket>>,
}

impl InMemoryBasketRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored basket.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn baskets(&self) -> Vec<Basket> {
        self.baskets.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasketRepository for InMemoryBasketRepository {
    async fn find_by_buyer_id(&self, buyer_id: &str) -> Result<Option<Basket>, DomainError> {
        let baskets = self.baskets.lock().unwrap();
        Ok(baskets
            .iter()
            .filter(|basket| basket.buyer_id() == buyer_id)
            .min_by_key(|basket| basket.id())
            .cloned())
    }

    async fn find_by_id(&self, basket_id: i64) -> Result<Option<Basket>, DomainError> {
        let baskets = self.baskets.lock().unwrap();
        Ok(baskets
            .iter()
            .find(|basket| basket.id() == Some(basket_id))
            .cloned())
    }

    async fn add(&self, basket: Basket) -> Result<Basket, DomainError> {
        let mut baskets = self.baskets.lock().unwrap();
        let persisted = match basket.id() {
            Some(_) => basket,
            None => {
                let next_id = baskets
                    .iter()
                    .filter_map(Basket::id)
                    .max()
                    .map_or(1, |max| max + 1);
                Basket::rehydrate(next_id, basket.buyer_id(), basket.items().to_vec())
            }
        };
        baskets.push(persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, basket: &Basket) -> Result<u64, DomainError> {
        let Some(basket_id) = basket.id() else {
            return Ok(0);
        };
        let mut baskets = self.baskets.lock().unwrap();
        match baskets
            .iter_mut()
            .find(|stored| stored.id() == Some(basket_id))
        {
            Some(stored) => {
                *stored = basket.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, basket: &Basket) -> Result<u64, DomainError> {
        let Some(basket_id) = basket.id() else {
            return Ok(0);
        };
        let mut baskets = self.baskets.lock().unwrap();
        let before = baskets.len();
        baskets.retain(|stored| stored.id() != Some(basket_id));
        Ok((before - baskets.len()) as u64)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.baskets.lock().unwrap().len() as u64)
    }
}

/// A basket repository that always returns a storage error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingBasketRepository;

#[async_trait]
impl BasketRepository for FailingBasketRepository {
    async fn find_by_buyer_id(&self, _buyer_id: &str) -> Result<Option<Basket>, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }

    async fn find_by_id(&self, _basket_id: i64) -> Result<Option<Basket>, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }

    async fn add(&self, _basket: Basket) -> Result<Basket, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }

    async fn update(&self, _basket: &Basket) -> Result<u64, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }

    async fn delete(&self, _basket: &Basket) -> Result<u64, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(DomainError::Storage("connection refused".into()))
    }
}
