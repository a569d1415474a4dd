//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                    - Health check: DB, cache, publisher
//! - `GET  /metrics`                   - Prometheus metrics
//! - `GET    /api/basket/{user_name}`  - Fetch a basket
//! - `POST   /api/basket`              - Create/replace a basket
//! - `DELETE /api/basket/{user_name}`  - Delete a basket (idempotent)
//! - `POST   /api/basket/checkout`     - Publish checkout event, retire basket
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    checkout_handler, delete_basket_handler, get_basket_handler, health_handler, metrics_handler,
    update_basket_handler,
};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::Layer;
use tower_http::LatencyUnit;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `metrics_handle` - Prometheus recorder handle backing `GET /metrics`
pub fn app_router(state: AppState, metrics_handle: PrometheusHandle) -> NormalizePath<Router> {
    let api_router = Router::new()
        .route("/basket", post(update_basket_handler))
        .route("/basket/checkout", post(checkout_handler))
        .route(
            "/basket/{user_name}",
            get(get_basket_handler).delete(delete_basket_handler),
        );

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
