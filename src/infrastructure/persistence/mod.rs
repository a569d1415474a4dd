//! Cart persistence: the PostgreSQL base repository and its decorators.
//!
//! # Layout
//!
//! - [`PgCartRepository`] - durable JSONB document store, the system of record
//! - [`decorators`] - caching, logging, and metrics wrappers sharing the same
//!   repository trait

pub mod decorators;
pub mod pg_cart_repository;

pub use pg_cart_repository::PgCartRepository;
