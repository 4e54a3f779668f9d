//! Application services and queries for the basket context.

pub mod basket_service;
pub mod query_handlers;
