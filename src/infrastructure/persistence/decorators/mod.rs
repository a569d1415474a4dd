//! Cross-cutting decorators for the cart repository.
//!
//! Each decorator implements [`crate::domain::repositories::CartRepository`]
//! around an inner implementation of the same trait, so any subset can be
//! composed in any order. The chain assembled at startup is
//! `Pg → Metrics → Logging → Caching`, with caching outermost so a hit
//! short-circuits the deeper layers.
//!
//! Each layer instruments what it owns: cache hit/miss belongs to the caching
//! decorator, store latency to the layers adjacent to the store.

pub mod caching;
pub mod logging;
pub mod metrics;

pub use self::caching::CachingCartRepository;
pub use self::logging::LoggingCartRepository;
pub use self::metrics::MetricsCartRepository;
