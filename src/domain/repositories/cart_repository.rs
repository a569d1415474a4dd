//! Repository trait for shopping cart persistence.

use crate::domain::entities::ShoppingCart;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-user shopping carts.
///
/// One cart per user key. The repository is a stateless pass-through: it owns
/// no aggregate state and never fabricates an empty cart for a missing key.
///
/// Decorators (caching, logging, metrics) implement this same trait around an
/// inner implementation, so any subset composes in any order.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCartRepository`] - PostgreSQL document store
/// - [`crate::infrastructure::persistence::decorators`] - cross-cutting wrappers
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Fetches the cart for a user key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(cart))` if a cart exists
    /// - `Ok(None)` if no cart is stored for this key
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the durable store cannot
    /// be reached.
    async fn get(&self, user_id: &str) -> Result<Option<ShoppingCart>, AppError>;

    /// Upserts the cart, replacing any existing document for the same user
    /// key in full. Merge semantics belong to the aggregate, not the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the durable store cannot
    /// be reached.
    async fn put(&self, cart: ShoppingCart) -> Result<ShoppingCart, AppError>;

    /// Deletes the cart for a user key.
    ///
    /// Returns `Ok(true)` if a cart was removed, `Ok(false)` if none existed.
    /// Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the durable store cannot
    /// be reached.
    async fn delete(&self, user_id: &str) -> Result<bool, AppError>;
}
