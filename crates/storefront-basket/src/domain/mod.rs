//! Domain model for the basket context.

pub mod basket;
