//! Fixture builder for baskets in a known state.

use rust_decimal::Decimal;
use storefront_basket::domain::basket::{Basket, BasketItem};

/// Buyer id used by [`BasketBuilder`] unless overridden.
pub const DEFAULT_BUYER_ID: &str = "test-buyer@example.com";

/// Builds baskets for tests. Without `with_id` the built basket is
/// unpersisted, matching what a repository `add` would receive.
#[derive(Debug)]
pub struct BasketBuilder {
    id: Option<i64>,
    buyer_id: String,
    items: Vec<BasketItem>,
}

impl BasketBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            buyer_id: DEFAULT_BUYER_ID.to_owned(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_buyer_id(mut self, buyer_id: impl Into<String>) -> Self {
        self.buyer_id = buyer_id.into();
        self
    }

    #[must_use]
    pub fn with_item(mut self, catalog_item_id: i64, unit_price: Decimal, quantity: u32) -> Self {
        self.items
            .push(BasketItem::new(catalog_item_id, unit_price, quantity));
        self
    }

    /// Adds one fixed line: catalog item 2 at 3.40, quantity 4.
    #[must_use]
    pub fn with_one_item(self) -> Self {
        self.with_item(2, Decimal::new(340, 2), 4)
    }

    #[must_use]
    pub fn build(self) -> Basket {
        match self.id {
            Some(id) => Basket::rehydrate(id, self.buyer_id, self.items),
            None => {
                let mut basket = Basket::new(self.buyer_id);
                for item in self.items {
                    basket.add_item(item.catalog_item_id(), item.unit_price(), item.quantity());
                }
                basket
            }
        }
    }
}

impl Default for BasketBuilder {
    fn default() -> Self {
        Self::new()
    }
}
