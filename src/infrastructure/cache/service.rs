//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the volatile byte-payload cache.
///
/// Implementations must be thread-safe. They report faults honestly: the
/// caching repository decorator owns the degrade policy (fall through to the
/// durable store on read faults, best-effort invalidation on write faults),
/// so a cache fault never fails a caller operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the raw payload stored under a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the cache backend cannot be reached.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores a payload under a key with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - The cache key
    /// - `value` - The serialized payload
    /// - `ttl_seconds` - Optional TTL in seconds (implementation default if None)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the write does not reach the backend.
    async fn set(&self, key: &str, value: &[u8], ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes the payload stored under a key.
    ///
    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the cache backend cannot be reached.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
