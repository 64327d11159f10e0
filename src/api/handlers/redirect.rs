//! Handler for short key redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::link_info_handler;

/// Suffix that turns a redirect into the link info view.
pub const INFO_SUFFIX: char = '+';

/// Redirects a short key to its long URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Every successful redirect records one access event before responding.
/// A key ending in `+` renders the link info page instead and records nothing.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if let Some(key) = key.strip_suffix(INFO_SUFFIX) {
        return link_info_handler(&state, key).await;
    }

    let url = state
        .stats_service
        .resolve(&key, Utc::now().timestamp())
        .await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}
