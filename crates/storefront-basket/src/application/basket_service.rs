//! Orchestration service for basket workflows.
//!
//! The service coordinates loads and stores through the repository
//! contract; all item bookkeeping lives on the aggregate itself. Every
//! operation runs within a single request and holds no state across calls.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::domain::basket::Basket;
use crate::error::DomainError;
use crate::repository::BasketRepository;

/// Application service for basket workflows.
#[derive(Clone)]
pub struct BasketService {
    repository: Arc<dyn BasketRepository>,
    split_threshold: Decimal,
}

impl BasketService {
    /// Creates a service with the default split threshold of 100.
    #[must_use]
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self::with_split_threshold(repository, Decimal::ONE_HUNDRED)
    }

    /// Creates a service with a custom split threshold.
    #[must_use]
    pub fn with_split_threshold(
        repository: Arc<dyn BasketRepository>,
        split_threshold: Decimal,
    ) -> Self {
        Self {
            repository,
            split_threshold,
        }
    }

    /// Adds an item to the buyer's basket, creating the basket on first
    /// use. Returns the persisted basket, identity included.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the repository fails.
    #[instrument(skip(self))]
    pub async fn add_item_to_basket(
        &self,
        buyer_id: &str,
        catalog_item_id: i64,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Basket, DomainError> {
        match self.repository.find_by_buyer_id(buyer_id).await? {
            Some(mut basket) => {
                basket.add_item(catalog_item_id, unit_price, quantity);
                self.repository.update(&basket).await?;
                Ok(basket)
            }
            None => {
                let mut basket = Basket::new(buyer_id);
                basket.add_item(catalog_item_id, unit_price, quantity);
                self.repository.add(basket).await
            }
        }
    }

    /// Deletes a basket by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BasketNotFound` if no basket has that id and
    /// `DomainError::Storage` if the repository fails.
    #[instrument(skip(self))]
    pub async fn delete_basket(&self, basket_id: i64) -> Result<(), DomainError> {
        let Some(basket) = self.repository.find_by_id(basket_id).await? else {
            return Err(DomainError::BasketNotFound(basket_id));
        };
        self.repository.delete(&basket).await?;
        Ok(())
    }

    /// Splits the items priced at or above the configured threshold into a
    /// new basket for the same buyer.
    ///
    /// `Ok(None)` means the operation ran but there was nothing to split;
    /// the basket is written back unchanged either way. On a split the new
    /// basket is persisted first and returned with its assigned identity,
    /// then the trimmed original is updated.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BasketNotFound` if no basket has that id and
    /// `DomainError::Storage` if the repository fails.
    #[instrument(skip(self))]
    pub async fn split_basket(&self, basket_id: i64) -> Result<Option<Basket>, DomainError> {
        let Some(mut basket) = self.repository.find_by_id(basket_id).await? else {
            return Err(DomainError::BasketNotFound(basket_id));
        };

        match basket.split(self.split_threshold) {
            Some(new_basket) => {
                let persisted = self.repository.add(new_basket).await?;
                self.repository.update(&basket).await?;
                info!(
                    basket_id,
                    new_basket_id = ?persisted.id(),
                    threshold = %self.split_threshold,
                    "basket split"
                );
                Ok(Some(persisted))
            }
            None => {
                self.repository.update(&basket).await?;
                debug!(basket_id, "no items to split");
                Ok(None)
            }
        }
    }

    /// Moves the anonymous buyer's basket contents to the registered buyer.
    ///
    /// Merges into the registered buyer's basket when one exists, summing
    /// quantities for shared catalog items and appending the rest, then
    /// deletes the anonymous basket. Without a registered basket the
    /// anonymous one is reassigned in place. A missing anonymous basket and
    /// a transfer from a buyer to itself are both no-ops; an empty
    /// anonymous basket still gets deleted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` if the repository fails.
    #[instrument(skip(self))]
    pub async fn transfer_basket(
        &self,
        anonymous_buyer_id: &str,
        registered_buyer_id: &str,
    ) -> Result<(), DomainError> {
        if anonymous_buyer_id == registered_buyer_id {
            return Ok(());
        }
        let Some(anonymous_basket) = self.repository.find_by_buyer_id(anonymous_buyer_id).await?
        else {
            debug!(anonymous_buyer_id, "no anonymous basket to transfer");
            return Ok(());
        };

        match self.repository.find_by_buyer_id(registered_buyer_id).await? {
            Some(mut registered_basket) => {
                for item in anonymous_basket.items() {
                    registered_basket.add_item(
                        item.catalog_item_id(),
                        item.unit_price(),
                        item.quantity(),
                    );
                }
                self.repository.update(&registered_basket).await?;
                self.repository.delete(&anonymous_basket).await?;
                info!(
                    anonymous_buyer_id,
                    registered_buyer_id, "merged anonymous basket into registered basket"
                );
            }
            None => {
                let mut basket = anonymous_basket;
                basket.set_buyer_id(registered_buyer_id);
                self.repository.update(&basket).await?;
                info!(
                    anonymous_buyer_id,
                    registered_buyer_id, "reassigned anonymous basket to registered buyer"
                );
            }
        }
        Ok(())
    }

    /// Replaces item quantities and prunes items set to zero. Catalog items
    /// that are not in the basket are ignored. Returns the updated basket.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BasketNotFound` if no basket has that id and
    /// `DomainError::Storage` if the repository fails.
    #[instrument(skip(self))]
    pub async fn set_quantities(
        &self,
        basket_id: i64,
        quantities: &[(i64, u32)],
    ) -> Result<Basket, DomainError> {
        let Some(mut basket) = self.repository.find_by_id(basket_id).await? else {
            return Err(DomainError::BasketNotFound(basket_id));
        };
        for &(catalog_item_id, quantity) in quantities {
            basket.set_item_quantity(catalog_item_id, quantity);
        }
        basket.remove_empty_items();
        self.repository.update(&basket).await?;
        Ok(basket)
    }
}
