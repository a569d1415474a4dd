//! Checkout sequencing service.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::checkout_event::{BasketCheckoutEvent, CheckoutDetails};
use crate::domain::repositories::CartRepository;
use crate::error::AppError;
use crate::infrastructure::messaging::MessagePublisher;

/// Progress of a single checkout sequence.
///
/// ```text
/// Started ──► BasketLoaded ──► EventPublished ──► BasketRetired ──► Done
///    └──────────────┴─────────────────┴──────────────────┴──► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Started,
    BasketLoaded,
    EventPublished,
    BasketRetired,
    Done,
    Failed,
}

impl CheckoutState {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Done | CheckoutState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Started => "Started",
            CheckoutState::BasketLoaded => "BasketLoaded",
            CheckoutState::EventPublished => "EventPublished",
            CheckoutState::BasketRetired => "BasketRetired",
            CheckoutState::Done => "Done",
            CheckoutState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Business result of a checkout attempt.
///
/// A missing basket is a normal outcome, not an error: the caller asked to
/// check out a basket that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed,
    NoSuchBasket,
}

/// Orchestrates read → publish → retire for a basket checkout.
///
/// The event is published before the basket is deleted, so a delete failure
/// after a successful publish leaves a basket that could be checked out
/// again. That failure is surfaced, never hidden; downstream consumers
/// deduplicate on the event id carried by every published event.
pub struct CheckoutService {
    cart_repository: Arc<dyn CartRepository>,
    publisher: Arc<dyn MessagePublisher>,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(
        cart_repository: Arc<dyn CartRepository>,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            cart_repository,
            publisher,
        }
    }

    /// Runs the checkout sequence for the user named in `details`.
    ///
    /// 1. Load the basket; absent → [`CheckoutOutcome::NoSuchBasket`].
    /// 2. Build the event from the live aggregate (items and total are taken
    ///    from the loaded basket, never from checkout input).
    /// 3. Publish. Failure → [`AppError::PublishFailure`], basket kept.
    /// 4. Delete the basket. Failure → error surfaced; the event is already
    ///    on the bus.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PublishFailure`] or [`AppError::StoreUnavailable`]
    /// as described above.
    #[tracing::instrument(skip(self, details), fields(user_name = %details.user_name))]
    pub async fn checkout(&self, details: CheckoutDetails) -> Result<CheckoutOutcome, AppError> {
        let start = Instant::now();
        let mut state = CheckoutState::Started;
        info!(state = %state, "Checkout started");

        let cart = match self.cart_repository.get(&details.user_name).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                warn!("No basket to check out");
                Self::finish(CheckoutState::Failed, "no_basket", start);
                return Ok(CheckoutOutcome::NoSuchBasket);
            }
            Err(e) => {
                Self::finish(CheckoutState::Failed, "load_failed", start);
                return Err(e);
            }
        };
        state = CheckoutState::BasketLoaded;

        let event = BasketCheckoutEvent::from_cart(&details, &cart);
        info!(
            state = %state,
            event_id = %event.event_id,
            total = %event.total_price,
            items = event.items.len(),
            "Basket loaded"
        );

        if let Err(e) = self.publisher.publish_checkout(&event).await {
            error!(state = %state, error = %e, "Checkout event publish failed, basket kept");
            Self::finish(CheckoutState::Failed, "publish_failed", start);
            return Err(AppError::publish_failure(
                "Checkout event could not be published",
                json!({ "user_name": details.user_name }),
            ));
        }
        state = CheckoutState::EventPublished;

        if let Err(e) = self.cart_repository.delete(&details.user_name).await {
            // The event is already on the bus: a retried checkout would
            // publish again. Consumers deduplicate on event_id.
            error!(
                state = %state,
                event_id = %event.event_id,
                error = %e,
                "Basket delete failed after publish"
            );
            Self::finish(CheckoutState::Failed, "retire_failed", start);
            return Err(e);
        }
        state = CheckoutState::BasketRetired;

        info!(state = %state, event_id = %event.event_id, "Checkout completed");
        Self::finish(CheckoutState::Done, "completed", start);

        Ok(CheckoutOutcome::Completed)
    }

    fn finish(state: CheckoutState, outcome: &'static str, start: Instant) {
        debug_assert!(state.is_terminal());
        metrics::histogram!("basket_checkout_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        metrics::counter!("basket_checkout_total", "outcome" => outcome).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CartItem, ShoppingCart};
    use crate::domain::repositories::MockCartRepository;
    use crate::infrastructure::messaging::{MockMessagePublisher, PublishError};
    use rust_decimal::Decimal;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            user_name: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email_address: "alice@example.com".to_string(),
            shipping_address: "1 Main St".to_string(),
            card_number: "4111111111111111".to_string(),
            card_holder_name: "Alice Smith".to_string(),
            card_expiration: "12/30".to_string(),
        }
    }

    fn sample_cart() -> ShoppingCart {
        let mut cart = ShoppingCart::new("alice").unwrap();
        cart.add_item(CartItem::new("P1", "Widget", Decimal::new(1000, 2), 2).unwrap());
        cart
    }

    #[tokio::test]
    async fn test_missing_basket_is_negative_outcome_not_error() {
        let mut repo = MockCartRepository::new();
        repo.expect_get().times(1).returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let mut publisher = MockMessagePublisher::new();
        publisher.expect_publish_checkout().times(0);

        let service = CheckoutService::new(Arc::new(repo), Arc::new(publisher));

        let outcome = service.checkout(details()).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::NoSuchBasket);
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_basket() {
        let mut repo = MockCartRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| Ok(Some(sample_cart())));
        repo.expect_delete().times(0);

        let mut publisher = MockMessagePublisher::new();
        publisher
            .expect_publish_checkout()
            .times(1)
            .returning(|_| Err(PublishError::Transport("bus down".to_string())));

        let service = CheckoutService::new(Arc::new(repo), Arc::new(publisher));

        let result = service.checkout(details()).await;
        assert!(matches!(result, Err(AppError::PublishFailure { .. })));
    }

    #[tokio::test]
    async fn test_delete_failure_after_publish_is_surfaced() {
        let mut repo = MockCartRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| Ok(Some(sample_cart())));
        repo.expect_delete().times(1).returning(|_| {
            Err(AppError::store_unavailable("store down", json!({})))
        });

        let mut publisher = MockMessagePublisher::new();
        publisher
            .expect_publish_checkout()
            .times(1)
            .returning(|_| Ok(()));

        let service = CheckoutService::new(Arc::new(repo), Arc::new(publisher));

        let result = service.checkout(details()).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_successful_checkout_publishes_aggregate_total_then_deletes() {
        let mut repo = MockCartRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| Ok(Some(sample_cart())));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let mut publisher = MockMessagePublisher::new();
        publisher
            .expect_publish_checkout()
            .withf(|event| {
                event.total_price == Decimal::new(2000, 2)
                    && event.items.len() == 1
                    && event.user_name == "alice"
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = CheckoutService::new(Arc::new(repo), Arc::new(publisher));

        let outcome = service.checkout(details()).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::Completed);
    }

    #[test]
    fn test_checkout_state_terminality() {
        assert!(!CheckoutState::Started.is_terminal());
        assert!(!CheckoutState::BasketLoaded.is_terminal());
        assert!(!CheckoutState::EventPublished.is_terminal());
        assert!(!CheckoutState::BasketRetired.is_terminal());
        assert!(CheckoutState::Done.is_terminal());
        assert!(CheckoutState::Failed.is_terminal());
    }

    #[test]
    fn test_checkout_state_display() {
        assert_eq!(CheckoutState::Started.to_string(), "Started");
        assert_eq!(CheckoutState::EventPublished.to_string(), "EventPublished");
        assert_eq!(CheckoutState::Failed.to_string(), "Failed");
    }
}
