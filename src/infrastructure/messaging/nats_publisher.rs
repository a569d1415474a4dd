//! NATS-backed checkout event publisher.

use async_trait::async_trait;
use tracing::info;

use super::publisher::{MessagePublisher, PublishError};
use crate::domain::checkout_event::BasketCheckoutEvent;

const CHECKOUT_SUBJECT: &str = "basket.checkout";

/// Publishes checkout events to a NATS subject.
///
/// The connection is established once at startup and validated; individual
/// publishes are flushed so a returned `Ok` means the broker has the event.
pub struct NatsPublisher {
    client: async_nats::Client,
}

impl NatsPublisher {
    /// Connects to NATS and validates the connection.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Transport`] if the connection cannot be
    /// established.
    pub async fn connect(nats_url: &str) -> Result<Self, PublishError> {
        info!("Connecting to NATS at {}", nats_url);

        let client = async_nats::connect(nats_url)
            .await
            .map_err(|e| PublishError::Transport(format!("Failed to connect to NATS: {}", e)))?;

        info!("✓ Connected to NATS");

        Ok(Self { client })
    }

    /// Flushes buffered publishes so shutdown does not drop accepted events.
    pub async fn flush(&self) -> Result<(), PublishError> {
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Transport(format!("NATS flush failed: {}", e)))
    }
}

#[async_trait]
impl MessagePublisher for NatsPublisher {
    async fn publish_checkout(&self, event: &BasketCheckoutEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(CHECKOUT_SUBJECT, payload.into())
            .await
            .map_err(|e| PublishError::Transport(format!("NATS publish failed: {}", e)))?;

        // The flush is the per-call acknowledgement: without it a buffered
        // event could be lost while checkout goes on to delete the basket.
        self.flush().await?;

        info!(
            event_id = %event.event_id,
            user_name = %event.user_name,
            "Published checkout event"
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        matches!(
            self.client.connection_state(),
            async_nats::connection::State::Connected
        )
    }
}
