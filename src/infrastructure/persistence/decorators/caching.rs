//! Cache-aside decorator for the cart repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::ShoppingCart;
use crate::domain::repositories::CartRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Cache-aside wrapper around an inner cart repository.
///
/// Reads check the cache first and short-circuit on a hit; misses fall
/// through to the inner chain and populate the cache. Writes go through the
/// inner chain first and then refresh or evict the cache entry, so the cache
/// is never the system of record.
///
/// Cache faults never fail a caller operation: a failed read degrades to the
/// inner chain, a failed refresh/eviction leaves a stale entry behind a
/// best-effort invalidation, and the TTL corrects whatever remains.
pub struct CachingCartRepository {
    inner: Arc<dyn CartRepository>,
    cache: Arc<dyn CacheService>,
    ttl_seconds: Option<u64>,
}

impl CachingCartRepository {
    /// Wraps `inner` with cache-aside behavior.
    ///
    /// `ttl_seconds = None` uses the cache adapter's configured default TTL.
    pub fn new(
        inner: Arc<dyn CartRepository>,
        cache: Arc<dyn CacheService>,
        ttl_seconds: Option<u64>,
    ) -> Self {
        Self {
            inner,
            cache,
            ttl_seconds,
        }
    }

    /// Best-effort eviction used whenever the cache may disagree with the
    /// durable store. Failures are logged and swallowed.
    async fn invalidate(&self, user_id: &str) {
        if let Err(e) = self.cache.delete(user_id).await {
            warn!(user_id, error = %e, "Failed to invalidate cache entry");
        }
    }

    /// Serializes and stores the cart in the cache. Failures degrade to an
    /// invalidation attempt so a half-written entry cannot be served.
    async fn refresh(&self, cart: &ShoppingCart) {
        let payload = match serde_json::to_vec(cart) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(user_id = %cart.user_id, error = %e, "Failed to serialize basket for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set(&cart.user_id, &payload, self.ttl_seconds).await {
            warn!(user_id = %cart.user_id, error = %e, "Failed to refresh cache entry");
            self.invalidate(&cart.user_id).await;
        }
    }
}

#[async_trait]
impl CartRepository for CachingCartRepository {
    async fn get(&self, user_id: &str) -> Result<Option<ShoppingCart>, AppError> {
        match self.cache.get(user_id).await {
            Ok(Some(payload)) => match serde_json::from_slice::<ShoppingCart>(&payload) {
                Ok(cart) => {
                    metrics::counter!("basket_cache_requests_total", "outcome" => "hit")
                        .increment(1);
                    debug!(user_id, "Basket served from cache");
                    return Ok(Some(cart));
                }
                Err(e) => {
                    // Poisoned entry: evict so the next read-through heals it.
                    warn!(user_id, error = %e, "Corrupt cache entry, treating as miss");
                    self.invalidate(user_id).await;
                }
            },
            Ok(None) => {
                metrics::counter!("basket_cache_requests_total", "outcome" => "miss").increment(1);
            }
            Err(e) => {
                metrics::counter!("basket_cache_requests_total", "outcome" => "error").increment(1);
                warn!(user_id, error = %e, "Cache unreachable on read, falling back to store");
            }
        }

        let cart = self.inner.get(user_id).await?;

        if let Some(cart) = &cart {
            self.refresh(cart).await;
        }

        Ok(cart)
    }

    async fn put(&self, cart: ShoppingCart) -> Result<ShoppingCart, AppError> {
        let user_id = cart.user_id.clone();

        match self.inner.put(cart).await {
            Ok(stored) => {
                self.refresh(&stored).await;
                Ok(stored)
            }
            Err(e) => {
                // The durable write failed; make sure the cache cannot serve
                // a value the store never accepted.
                self.invalidate(&user_id).await;
                Err(e)
            }
        }
    }

    async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        match self.inner.delete(user_id).await {
            Ok(existed) => {
                self.invalidate(user_id).await;
                Ok(existed)
            }
            Err(e) => {
                self.invalidate(user_id).await;
                Err(e)
            }
        }
    }
}
