//! Checkout event publisher trait and error types.

use async_trait::async_trait;

use crate::domain::checkout_event::BasketCheckoutEvent;

/// Errors from the event publisher.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("publish failed: {0}")]
    Transport(String),
}

/// Trait for publishing checkout events to the message bus.
///
/// Delivery is at-least-once: a reported success means the broker accepted
/// the event, and consumers must deduplicate on the event id. No ordering is
/// guaranteed beyond per-call success or failure.
///
/// # Implementations
///
/// - [`crate::infrastructure::messaging::NatsPublisher`] - NATS-backed publisher
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publishes a checkout event and waits for the broker to accept it.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the event cannot be serialized or the
    /// broker does not acknowledge the write. Checkout treats any error as
    /// fatal and preserves the basket.
    async fn publish_checkout(&self, event: &BasketCheckoutEvent) -> Result<(), PublishError>;

    /// Reports whether the connection to the broker is currently up.
    async fn health_check(&self) -> bool;
}
