//! Logging decorator for the cart repository.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::domain::entities::ShoppingCart;
use crate::domain::repositories::CartRepository;
use crate::error::AppError;

/// Logs start, result, and duration of every repository operation.
///
/// Successful calls log at info level; failures log at error level with the
/// cause and are rethrown unchanged. The decorator never alters the value or
/// error flowing through it.
pub struct LoggingCartRepository {
    inner: Arc<dyn CartRepository>,
}

impl LoggingCartRepository {
    pub fn new(inner: Arc<dyn CartRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CartRepository for LoggingCartRepository {
    async fn get(&self, user_id: &str) -> Result<Option<ShoppingCart>, AppError> {
        info!(user_id, "Getting basket");
        let start = Instant::now();

        match self.inner.get(user_id).await {
            Ok(cart) => {
                info!(
                    user_id,
                    found = cart.is_some(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Got basket"
                );
                Ok(cart)
            }
            Err(e) => {
                error!(user_id, error = %e, "Error getting basket");
                Err(e)
            }
        }
    }

    async fn put(&self, cart: ShoppingCart) -> Result<ShoppingCart, AppError> {
        let user_id = cart.user_id.clone();
        info!(user_id, items = cart.item_count(), "Storing basket");
        let start = Instant::now();

        match self.inner.put(cart).await {
            Ok(stored) => {
                info!(
                    user_id,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Stored basket"
                );
                Ok(stored)
            }
            Err(e) => {
                error!(user_id, error = %e, "Error storing basket");
                Err(e)
            }
        }
    }

    async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        info!(user_id, "Deleting basket");
        let start = Instant::now();

        match self.inner.delete(user_id).await {
            Ok(existed) => {
                info!(
                    user_id,
                    existed,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Deleted basket"
                );
                Ok(existed)
            }
            Err(e) => {
                error!(user_id, error = %e, "Error deleting basket");
                Err(e)
            }
        }
    }
}
