//! HTTP server initialization and runtime setup.
//!
//! Handles database, cache, and message bus connections, composes the
//! repository decorator chain, and runs the Axum server lifecycle.

use crate::application::services::{BasketService, CheckoutService};
use crate::config::Config;
use crate::domain::repositories::CartRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::discount::{DiscountService, HttpDiscountService, StubDiscountService};
use crate::infrastructure::messaging::{MessagePublisher, NatsPublisher};
use crate::infrastructure::persistence::PgCartRepository;
use crate::infrastructure::persistence::decorators::{
    CachingCartRepository, LoggingCartRepository, MetricsCartRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool + migrations
/// - Redis cache (or NullCache fallback)
/// - NATS publisher (required; startup fails without the bus)
/// - Discount client (stub fallback)
/// - Repository decorator chain: `Pg → Metrics → Logging → Caching`
/// - Prometheus recorder and Axum HTTP server
///
/// On shutdown (SIGINT/SIGTERM), the server stops accepting requests and the
/// publisher is flushed so accepted checkout events are not dropped.
///
/// # Errors
///
/// Returns an error if:
/// - Database or NATS connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let nats_publisher = Arc::new(NatsPublisher::connect(&config.nats_url).await?);
    let publisher: Arc<dyn MessagePublisher> = nats_publisher.clone();

    let discount_service: Arc<dyn DiscountService> = match &config.discount_service_url {
        Some(url) => Arc::new(HttpDiscountService::new(url)?),
        None => Arc::new(StubDiscountService::new()),
    };

    let pool = Arc::new(pool);
    let base = Arc::new(PgCartRepository::new(pool.clone()));
    let with_metrics = Arc::new(MetricsCartRepository::new(base));
    let with_logging = Arc::new(LoggingCartRepository::new(with_metrics));
    let repository: Arc<dyn CartRepository> =
        Arc::new(CachingCartRepository::new(with_logging, cache.clone(), None));

    let basket_service = Arc::new(BasketService::new(repository.clone(), discount_service));
    let checkout_service = Arc::new(CheckoutService::new(repository, publisher.clone()));

    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    let state = AppState {
        basket_service,
        checkout_service,
        db: pool,
        cache,
        publisher,
    };

    let app = app_router(state, metrics_handle);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = nats_publisher.flush().await {
        tracing::warn!("Failed to flush publisher on shutdown: {}", e);
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| tracing::error!("Failed to install Ctrl+C handler: {}", e));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
