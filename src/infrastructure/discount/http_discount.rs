//! HTTP discount lookup client.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::service::{Discount, DiscountError, DiscountService};

/// Wire representation returned by the discount backend.
#[derive(Debug, Deserialize)]
struct DiscountResponse {
    amount: Decimal,
    #[serde(default)]
    description: String,
}

/// Discount client talking to an external HTTP service.
///
/// `GET {base_url}/api/discount/{product_name}` returning
/// `{ "amount": "1.50", "description": "..." }`.
pub struct HttpDiscountService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDiscountService {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Request`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DiscountError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DiscountService for HttpDiscountService {
    async fn lookup(&self, product_name: &str) -> Result<Discount, DiscountError> {
        let url = format!("{}/api/discount/{}", self.base_url, product_name);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscountResponse>()
            .await?;

        if response.amount < Decimal::ZERO {
            return Err(DiscountError::Malformed(format!(
                "negative discount amount {} for {}",
                response.amount, product_name
            )));
        }

        debug!(
            product_name,
            amount = %response.amount,
            "Discount lookup succeeded"
        );

        Ok(Discount {
            amount: response.amount,
            description: response.description,
        })
    }
}
