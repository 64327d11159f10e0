//! API route configuration.
//!
//! Endpoints authenticate with the API key carried in the JSON body.

use crate::api::handlers::{lookup_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Version 1 API routes.
///
/// # Endpoints
///
/// - `POST /v1/short` - Store a URL, optionally under a wished key
/// - `POST /v1/long`  - Look up the URL and access times of a key
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/short", post(shorten_handler))
        .route("/v1/long", post(lookup_handler))
}
