//! Route modules for the API server.

pub mod basket;
pub mod health;
