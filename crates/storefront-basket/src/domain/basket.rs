//! Basket aggregate root and its items.

use rust_decimal::Decimal;

/// A single line in a basket: one catalog item with the price captured when
/// it was first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketItem {
    catalog_item_id: i64,
    unit_price: Decimal,
    quantity: u32,
}

impl BasketItem {
    /// Creates a new basket item.
    #[must_use]
    pub fn new(catalog_item_id: i64, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            catalog_item_id,
            unit_price,
            quantity,
        }
    }

    /// The catalog item this line refers to.
    #[must_use]
    pub fn catalog_item_id(&self) -> i64 {
        self.catalog_item_id
    }

    /// Price snapshot captured when the item entered the basket. Adding
    /// the same catalog item again does not change it.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Units of this catalog item in the basket. Zero is allowed and only
    /// removed by [`Basket::remove_empty_items`].
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The aggregate root for a shopping basket.
///
/// Items are kept in insertion order and stay unique per catalog item for
/// the whole life of the basket; all item mutation goes through the methods
/// on this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    /// Identity assigned by the persistence layer. `None` until first saved.
    id: Option<i64>,
    /// The buyer who owns this basket.
    buyer_id: String,
    /// Items in insertion order, unique by catalog item id.
    items: Vec<BasketItem>,
}

impl Basket {
    /// Creates an empty, unpersisted basket for a buyer.
    #[must_use]
    pub fn new(buyer_id: impl Into<String>) -> Self {
        Self {
            id: None,
            buyer_id: buyer_id.into(),
            items: Vec::new(),
        }
    }

    /// Reconstructs a persisted basket from its stored parts.
    ///
    /// This is the only way to give a basket an identity; it is meant for
    /// storage adapters and test fixtures.
    #[must_use]
    pub fn rehydrate(id: i64, buyer_id: impl Into<String>, items: Vec<BasketItem>) -> Self {
        Self {
            id: Some(id),
            buyer_id: buyer_id.into(),
            items,
        }
    }

    /// Persistence identity, `None` for a basket that was never saved.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The buyer who owns this basket.
    #[must_use]
    pub fn buyer_id(&self) -> &str {
        &self.buyer_id
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Total units across all items.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(BasketItem::quantity).sum()
    }

    /// Adds `quantity` units of a catalog item.
    ///
    /// If the catalog item is already in the basket its quantity is
    /// incremented and the recorded unit price stays as it was first
    /// captured; `unit_price` only takes effect when the item enters the
    /// basket. Quantities of zero are accepted as given.
    pub fn add_item(&mut self, catalog_item_id: i64, unit_price: Decimal, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.catalog_item_id == catalog_item_id)
        {
            item.quantity += quantity;
        } else {
            self.items
                .push(BasketItem::new(catalog_item_id, unit_price, quantity));
        }
    }

    /// Removes every item whose quantity is exactly zero.
    pub fn remove_empty_items(&mut self) {
        self.items.retain(|item| item.quantity != 0);
    }

    /// Reassigns the basket to another buyer.
    pub fn set_buyer_id(&mut self, buyer_id: impl Into<String>) {
        self.buyer_id = buyer_id.into();
    }

    /// Replaces the quantity of the matching item. Catalog items that are
    /// not in the basket are ignored.
    pub fn set_item_quantity(&mut self, catalog_item_id: i64, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.catalog_item_id == catalog_item_id)
        {
            item.quantity = quantity;
        }
    }

    /// Moves every item priced at or above `threshold` into a new basket
    /// for the same buyer.
    ///
    /// Returns `None` and leaves the basket untouched when no item reaches
    /// the threshold or when every item does; splitting only makes sense
    /// when both sides end up non-empty. The moved items keep their price
    /// and quantity, both baskets keep the original relative order, and the
    /// returned basket has no identity until it is persisted.
    pub fn split(&mut self, threshold: Decimal) -> Option<Basket> {
        let expensive = self
            .items
            .iter()
            .filter(|item| item.unit_price >= threshold)
            .count();
        if expensive == 0 || expensive == self.items.len() {
            return None;
        }

        let (moved, kept): (Vec<BasketItem>, Vec<BasketItem>) = self
            .items
            .drain(..)
            .partition(|item| item.unit_price >= threshold);
        self.items = kept;

        let mut new_basket = Basket::new(self.buyer_id.clone());
        for item in moved {
            new_basket.add_item(item.catalog_item_id, item.unit_price, item.quantity);
        }
        Some(new_basket)
    }
}
