//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a long URL under a sequential key or a caller-chosen wish.
///
/// # Endpoint
///
/// `POST /api/v1/short`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "http://example.com",
///   "wish": "promo",   // optional
///   "key": "<32-character API key>"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url_long": "http://example.com",
///   "url_short": "promo",
///   "wish": true
/// }
/// ```
///
/// # Errors
///
/// - 400 for malformed JSON, an invalid URL or an invalid wish
/// - 401 for a missing, unknown or disabled API key
/// - 409 if the wish is taken by a different URL
/// - 429 once the key's daily quota is used up
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;

    let permit = state.auth_service.authorize(&payload.key, Utc::now()).await?;

    payload.validate()?;

    // The permit is held until the link exists so the quota count stays exact.
    let link = state
        .link_service
        .allocate(&payload.url, payload.wish(), Some(permit.key()))
        .await?;

    Ok(Json(link.into()))
}
