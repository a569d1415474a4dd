//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - The base implementation lives in `crate::infrastructure::persistence`
//! - Cross-cutting decorators in `crate::infrastructure::persistence::decorators`
//!   implement the same trait around an inner implementation
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod cart_repository;

pub use cart_repository::CartRepository;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
