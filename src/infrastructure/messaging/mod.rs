//! Checkout event publishing.
//!
//! Provides a [`MessagePublisher`] trait with a NATS-backed implementation.

mod nats_publisher;
mod publisher;

pub use nats_publisher::NatsPublisher;
pub use publisher::{MessagePublisher, PublishError};

#[cfg(test)]
pub use publisher::MockMessagePublisher;
