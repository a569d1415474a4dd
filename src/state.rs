use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{BasketService, CheckoutService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::messaging::MessagePublisher;

/// Shared application state injected into all handlers.
///
/// Clients are connected once at startup and shared; handlers see the
/// services plus the raw handles the health endpoint probes.
#[derive(Clone)]
pub struct AppState {
    pub basket_service: Arc<BasketService>,
    pub checkout_service: Arc<CheckoutService>,
    pub db: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
    pub publisher: Arc<dyn MessagePublisher>,
}
