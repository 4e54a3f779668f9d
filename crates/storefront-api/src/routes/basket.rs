//! Routes for the basket bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use storefront_basket::application::query_handlers::{self, BasketView};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /items.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Buyer whose basket receives the item.
    pub buyer_id: String,
    /// Catalog item to add.
    pub catalog_item_id: i64,
    /// Price captured at add time.
    pub unit_price: Decimal,
    /// Units to add. Defaults to one.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Request body for POST /transfer.
#[derive(Debug, Deserialize)]
pub struct TransferBasketRequest {
    /// Source basket owner, typically an anonymous session id.
    pub anonymous_buyer_id: String,
    /// Destination basket owner.
    pub registered_buyer_id: String,
}

/// A single quantity override within PUT /{basket_id}/quantities.
#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    /// Catalog item whose quantity is replaced.
    pub catalog_item_id: i64,
    /// New quantity; zero removes the item.
    pub quantity: u32,
}

/// Request body for PUT /{basket_id}/quantities.
#[derive(Debug, Deserialize)]
pub struct SetQuantitiesRequest {
    /// Quantity overrides to apply.
    pub quantities: Vec<QuantityUpdate>,
}

/// Response body for POST /{basket_id}/split.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    /// The newly created basket, or `null` when nothing qualified.
    pub new_basket: Option<BasketView>,
}

/// POST /items
#[instrument(skip(state, request), fields(buyer_id = %request.buyer_id))]
async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<BasketView>, ApiError> {
    info!(catalog_item_id = request.catalog_item_id, "adding item to basket");

    let basket = state
        .basket_service
        .add_item_to_basket(
            &request.buyer_id,
            request.catalog_item_id,
            request.unit_price,
            request.quantity,
        )
        .await?;

    Ok(Json(BasketView::from(&basket)))
}

/// GET /{basket_id}
#[instrument(skip(state))]
async fn get_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<i64>,
) -> Result<Json<BasketView>, ApiError> {
    let view = query_handlers::get_basket_by_id(basket_id, &*state.basket_repository).await?;

    Ok(Json(view))
}

/// GET /by-buyer/{buyer_id}
#[instrument(skip(state))]
async fn get_basket_for_buyer(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
) -> Result<Json<BasketView>, ApiError> {
    let view = query_handlers::get_basket_for_buyer(&buyer_id, &*state.basket_repository).await?;

    Ok(Json(view))
}

/// DELETE /{basket_id}
#[instrument(skip(state))]
async fn delete_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.basket_service.delete_basket(basket_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{basket_id}/split
#[instrument(skip(state))]
async fn split_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<i64>,
) -> Result<Json<SplitResponse>, ApiError> {
    let new_basket = state.basket_service.split_basket(basket_id).await?;

    Ok(Json(SplitResponse {
        new_basket: new_basket.as_ref().map(BasketView::from),
    }))
}

/// PUT /{basket_id}/quantities
#[instrument(skip(state, request))]
async fn set_quantities(
    State(state): State<AppState>,
    Path(basket_id): Path<i64>,
    Json(request): Json<SetQuantitiesRequest>,
) -> Result<Json<BasketView>, ApiError> {
    let quantities: Vec<(i64, u32)> = request
        .quantities
        .iter()
        .map(|update| (update.catalog_item_id, update.quantity))
        .collect();

    let basket = state
        .basket_service
        .set_quantities(basket_id, &quantities)
        .await?;

    Ok(Json(BasketView::from(&basket)))
}

/// POST /transfer
#[instrument(
    skip(state, request),
    fields(
        anonymous_buyer_id = %request.anonymous_buyer_id,
        registered_buyer_id = %request.registered_buyer_id,
    )
)]
async fn transfer_basket(
    State(state): State<AppState>,
    Json(request): Json<TransferBasketRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .basket_service
        .transfer_basket(&request.anonymous_buyer_id, &request.registered_buyer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the basket context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", post(add_item))
        .route("/transfer", post(transfer_basket))
        .route("/by-buyer/{buyer_id}", get(get_basket_for_buyer))
        .route("/{basket_id}", get(get_basket).delete(delete_basket))
        .route("/{basket_id}/split", post(split_basket))
        .route("/{basket_id}/quantities", put(set_quantities))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use storefront_basket::application::basket_service::BasketService;
    use storefront_basket::repository::BasketRepository;
    use storefront_test_support::{FailingBasketRepository, InMemoryBasketRepository};
    use tower::ServiceExt;

    fn app_with(repository: Arc<dyn BasketRepository>) -> Router {
        let basket_service = BasketService::new(Arc::clone(&repository));
        router().with_state(AppState::new(basket_service, repository))
    }

    fn test_app() -> Router {
        app_with(Arc::new(InMemoryBasketRepository::new()))
    }

    fn failing_app() -> Router {
        app_with(Arc::new(FailingBasketRepository))
    }

    #[tokio::test]
    async fn test_add_item_returns_200_with_basket_view() {
        // Arrange
        let app = test_app();
        let body = serde_json::json!({
            "buyer_id": "buyer-1",
            "catalog_item_id": 10,
            "unit_price": "10.50",
            "quantity": 2
        });

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["buyer_id"], "buyer-1");
        assert_eq!(json["items"][0]["unit_price"], "10.50");
        assert_eq!(json["total_items"], 2);
    }

    #[tokio::test]
    async fn test_add_item_defaults_quantity_to_one() {
        // Arrange
        let app = test_app();
        let body = serde_json::json!({
            "buyer_id": "buyer-1",
            "catalog_item_id": 10,
            "unit_price": "10.50"
        });

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(json["total_items"], 1);
    }

    #[tokio::test]
    async fn test_add_item_returns_422_for_missing_body() {
        // Arrange
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert: Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_basket_returns_404_for_missing_basket() {
        // Arrange
        let app = test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/42")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(json["error"], "basket_not_found");
    }

    #[tokio::test]
    async fn test_get_basket_returns_500_when_repository_fails() {
        // Arrange
        let app = failing_app();

        let request = Request::builder()
            .method("GET")
            .uri("/1")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(json["error"], "storage_error");
    }

    #[tokio::test]
    async fn test_transfer_returns_204() {
        // Arrange
        let app = test_app();
        let body = serde_json::json!({
            "anonymous_buyer_id": "anon-session",
            "registered_buyer_id": "registered-buyer"
        });

        let request = Request::builder()
            .method("POST")
            .uri("/transfer")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
