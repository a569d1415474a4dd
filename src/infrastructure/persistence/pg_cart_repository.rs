//! PostgreSQL implementation of the cart repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::ShoppingCart;
use crate::domain::repositories::CartRepository;
use crate::error::AppError;

/// PostgreSQL repository storing each cart as a JSONB document keyed by user id.
///
/// Writes are full-document upserts; there is no optimistic versioning, so
/// concurrent writes for the same user key are last-write-wins.
pub struct PgCartRepository {
    pool: Arc<PgPool>,
}

impl PgCartRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn get(&self, user_id: &str) -> Result<Option<ShoppingCart>, AppError> {
        let row = sqlx::query("SELECT data FROM baskets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let data: serde_json::Value = row.try_get("data")?;
        let cart = serde_json::from_value(data).map_err(|e| {
            AppError::internal(
                "Stored basket document is corrupt",
                json!({ "user_id": user_id, "cause": e.to_string() }),
            )
        })?;

        Ok(Some(cart))
    }

    async fn put(&self, cart: ShoppingCart) -> Result<ShoppingCart, AppError> {
        let data = serde_json::to_value(&cart).map_err(|e| {
            AppError::internal(
                "Failed to serialize basket",
                json!({ "user_id": cart.user_id, "cause": e.to_string() }),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO baskets (user_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(&cart.user_id)
        .bind(data)
        .execute(self.pool.as_ref())
        .await?;

        Ok(cart)
    }

    async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM baskets WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
