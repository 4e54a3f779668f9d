//! `PostgreSQL` storage adapter for the basket context.

pub mod pg_basket_repository;
pub mod schema;
