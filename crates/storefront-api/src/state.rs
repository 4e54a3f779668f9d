//! Shared application state.

use std::sync::Arc;

use storefront_basket::application::basket_service::BasketService;
use storefront_basket::repository::BasketRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestration service for basket workflows.
    pub basket_service: BasketService,
    /// Repository handle for read-side queries.
    pub basket_repository: Arc<dyn BasketRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        basket_service: BasketService,
        basket_repository: Arc<dyn BasketRepository>,
    ) -> Self {
        Self {
            basket_service,
            basket_repository,
        }
    }
}
