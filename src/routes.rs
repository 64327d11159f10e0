//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{key}`         - Redirect, or the link info page for `/{key}+`
//! - `GET  /health`        - Health check: DB, cache
//! - `POST /api/v1/short`  - Store a URL
//! - `POST /api/v1/long`   - Look up a key
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(api::routes::api_routes(), rate_limit::API, behind_proxy);

    let public_router = rate_limit::apply(
        Router::new().route("/{key}", get(redirect_handler)),
        rate_limit::PUBLIC,
        behind_proxy,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(public_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
