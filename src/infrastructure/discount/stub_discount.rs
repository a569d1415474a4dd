//! Stub discount client for when no discount backend is configured.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use super::service::{Discount, DiscountError, DiscountService};

/// Returns zero discount for every product.
///
/// Used when `DISCOUNT_SERVICE_URL` is not set, so basket updates behave
/// identically with and without a discount backend.
pub struct StubDiscountService;

impl StubDiscountService {
    pub fn new() -> Self {
        debug!("Using StubDiscountService (discount lookups disabled)");
        Self
    }
}

impl Default for StubDiscountService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscountService for StubDiscountService {
    async fn lookup(&self, _product_name: &str) -> Result<Discount, DiscountError> {
        Ok(Discount {
            amount: Decimal::ZERO,
            description: String::new(),
        })
    }
}
