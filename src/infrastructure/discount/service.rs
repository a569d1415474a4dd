//! Discount lookup trait and error types.

use async_trait::async_trait;
use rust_decimal::Decimal;

/// A discount returned by the external lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub amount: Decimal,
    pub description: String,
}

/// Errors from the discount lookup client.
///
/// These never propagate to basket callers: enrichment failures are logged
/// and the item keeps its original price.
#[derive(Debug, thiserror::Error)]
pub enum DiscountError {
    #[error("discount request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("discount response malformed: {0}")]
    Malformed(String),
}

/// Trait for looking up a discount by product name.
///
/// # Implementations
///
/// - [`crate::infrastructure::discount::HttpDiscountService`] - HTTP client
/// - [`crate::infrastructure::discount::StubDiscountService`] - zero-discount fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscountService: Send + Sync {
    /// Looks up the discount for a product name.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError`] when the backend is unreachable or returns
    /// an unusable response. Callers treat any error as "no discount".
    async fn lookup(&self, product_name: &str) -> Result<Discount, DiscountError>;
}
