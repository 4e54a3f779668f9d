//! Tests for the basket read-side query handlers.

use rust_decimal::Decimal;
use storefront_basket::application::query_handlers::{get_basket_by_id, get_basket_for_buyer};
use storefront_basket::error::DomainError;
use storefront_basket::repository::BasketRepository;
use storefront_test_support::{BasketBuilder, InMemoryBasketRepository};

#[tokio::test]
async fn test_get_basket_by_id_returns_view() {
    // Arrange
    let repo = InMemoryBasketRepository::new();
    let basket = repo
        .add(
            BasketBuilder::new()
                .with_buyer_id("buyer-1")
                .with_item(10, Decimal::new(1050, 2), 2)
                .with_item(20, Decimal::new(340, 2), 4)
                .build(),
        )
        .await
        .unwrap();

    // Act
    let view = get_basket_by_id(basket.id().unwrap(), &repo).await.unwrap();

    // Assert
    assert_eq!(view.id, basket.id().unwrap());
    assert_eq!(view.buyer_id, "buyer-1");
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.total_items, 6);
}

#[tokio::test]
async fn test_get_basket_by_id_returns_not_found_for_missing_id() {
    let repo = InMemoryBasketRepository::new();

    let result = get_basket_by_id(42, &repo).await;

    match result.unwrap_err() {
        DomainError::BasketNotFound(id) => assert_eq!(id, 42),
        other => panic!("expected BasketNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_basket_for_buyer_returns_view() {
    // Arrange
    let repo = InMemoryBasketRepository::new();
    repo.add(
        BasketBuilder::new()
            .with_buyer_id("buyer-1")
            .with_one_item()
            .build(),
    )
    .await
    .unwrap();

    // Act
    let view = get_basket_for_buyer("buyer-1", &repo).await.unwrap();

    // Assert
    assert_eq!(view.buyer_id, "buyer-1");
    assert_eq!(view.total_items, 4);
}

#[tokio::test]
async fn test_get_basket_for_buyer_returns_not_found_for_unknown_buyer() {
    let repo = InMemoryBasketRepository::new();

    let result = get_basket_for_buyer("buyer-1", &repo).await;

    match result.unwrap_err() {
        DomainError::NoBasketForBuyer(buyer) => assert_eq!(buyer, "buyer-1"),
        other => panic!("expected NoBasketForBuyer, got {other:?}"),
    }
}

#[tokio::test]
async fn test_basket_view_serializes_prices_as_strings() {
    // Arrange
    let repo = InMemoryBasketRepository::new();
    let basket = repo
        .add(
            BasketBuilder::new()
                .with_item(10, Decimal::new(1050, 2), 2)
                .build(),
        )
        .await
        .unwrap();
    let view = get_basket_by_id(basket.id().unwrap(), &repo).await.unwrap();

    // Act
    let json = serde_json::to_value(&view).unwrap();

    // Assert
    assert_eq!(json["items"][0]["unit_price"], "10.50");
    assert_eq!(json["items"][0]["quantity"], 2);
}
