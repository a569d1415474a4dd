//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, caching, discount lookup, and
//! event publishing.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository and its decorator chain
//! - [`discount`] - External discount lookup clients
//! - [`messaging`] - Checkout event publisher

pub mod cache;
pub mod discount;
pub mod messaging;
pub mod persistence;
