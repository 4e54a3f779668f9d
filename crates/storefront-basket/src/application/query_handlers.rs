//! Query handlers that read baskets into serializable views.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::basket::{Basket, BasketItem};
use crate::error::DomainError;
use crate::repository::BasketRepository;

/// Read model for a basket, shaped for API responses.
#[derive(Debug, Serialize)]
pub struct BasketView {
    /// Basket identity.
    pub id: i64,
    /// Owning buyer.
    pub buyer_id: String,
    /// Basket lines.
    pub items: Vec<BasketItemView>,
    /// Sum of all line quantities.
    pub total_items: u32,
}

/// Read model for a single basket line.
#[derive(Debug, Serialize)]
pub struct BasketItemView {
    /// Catalog item this line refers to.
    pub catalog_item_id: i64,
    /// Price captured when the item first entered the basket.
    pub unit_price: Decimal,
    /// Units of the catalog item.
    pub quantity: u32,
}

impl From<&Basket> for BasketView {
    fn from(basket: &Basket) -> Self {
        Self {
            id: basket.id().unwrap_or(0),
            buyer_id: basket.buyer_id().to_owned(),
            items: basket.items().iter().map(BasketItemView::from).collect(),
            total_items: basket.total_items(),
        }
    }
}

impl From<&BasketItem> for BasketItemView {
    fn from(item: &BasketItem) -> Self {
        Self {
            catalog_item_id: item.catalog_item_id(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
        }
    }
}

/// Loads a basket by id.
///
/// # Errors
///
/// Returns `DomainError::BasketNotFound` if no basket has that id and
/// `DomainError::Storage` if the repository fails.
pub async fn get_basket_by_id(
    basket_id: i64,
    repository: &dyn BasketRepository,
) -> Result<BasketView, DomainError> {
    let Some(basket) = repository.find_by_id(basket_id).await? else {
        return Err(DomainError::BasketNotFound(basket_id));
    };
    Ok(BasketView::from(&basket))
}

/// Loads the basket owned by a buyer.
///
/// # Errors
///
/// Returns `DomainError::NoBasketForBuyer` if the buyer has no basket and
/// `DomainError::Storage` if the repository fails.
pub async fn get_basket_for_buyer(
    buyer_id: &str,
    repository: &dyn BasketRepository,
) -> Result<BasketView, DomainError> {
    let Some(basket) = repository.find_by_buyer_id(buyer_id).await? else {
        return Err(DomainError::NoBasketForBuyer(buyer_id.to_owned()));
    };
    Ok(BasketView::from(&basket))
}
