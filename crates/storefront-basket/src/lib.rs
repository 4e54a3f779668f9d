//! Storefront Basket, the basket bounded context.
//!
//! This crate holds the basket aggregate, the repository contract, and the
//! application services that orchestrate basket workflows. It contains no
//! infrastructure code.

pub mod application;
pub mod domain;
pub mod error;
pub mod repository;
