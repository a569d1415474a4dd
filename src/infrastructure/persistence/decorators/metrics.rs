//! Metrics decorator for the cart repository.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::entities::ShoppingCart;
use crate::domain::repositories::CartRepository;
use crate::error::AppError;

const OPERATIONS_TOTAL: &str = "basket_repository_operations_total";
const OPERATION_DURATION: &str = "basket_repository_operation_duration_seconds";

/// Records one counter increment and one duration observation per call.
///
/// The histogram observation is taken on every path, including errors, and
/// the counter fires exactly once per call with the outcome label
/// (`hit`/`miss` for reads, `success`/`error` otherwise).
pub struct MetricsCartRepository {
    inner: Arc<dyn CartRepository>,
}

impl MetricsCartRepository {
    pub fn new(inner: Arc<dyn CartRepository>) -> Self {
        Self { inner }
    }

    fn observe(operation: &'static str, outcome: &'static str, start: Instant) {
        metrics::histogram!(OPERATION_DURATION, "operation" => operation)
            .record(start.elapsed().as_secs_f64());
        metrics::counter!(OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome)
            .increment(1);
    }
}

#[async_trait]
impl CartRepository for MetricsCartRepository {
    async fn get(&self, user_id: &str) -> Result<Option<ShoppingCart>, AppError> {
        let start = Instant::now();
        let result = self.inner.get(user_id).await;

        let outcome = match &result {
            Ok(Some(_)) => "hit",
            Ok(None) => "miss",
            Err(_) => "error",
        };
        Self::observe("get", outcome, start);

        result
    }

    async fn put(&self, cart: ShoppingCart) -> Result<ShoppingCart, AppError> {
        let start = Instant::now();
        let result = self.inner.put(cart).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        Self::observe("store", outcome, start);

        result
    }

    async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        let start = Instant::now();
        let result = self.inner.delete(user_id).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        Self::observe("delete", outcome, start);

        result
    }
}
