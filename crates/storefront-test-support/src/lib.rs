//! Shared test fakes and fixtures for the storefront basket services.

mod builder;
mod repository;

pub use builder::BasketBuilder;
pub use repository::{FailingBasketRepository, InMemoryBasketRepository};
