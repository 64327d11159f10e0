//! Handler for the key lookup endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::lookup::{LookupRequest, LookupResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the URL behind a key without counting an access.
///
/// # Endpoint
///
/// `POST /api/v1/long`
///
/// # Request Body
///
/// ```json
/// { "id": "9", "key": "<32-character API key>", "statistics": true }
/// ```
///
/// # Response
///
/// ```json
/// { "url_short": "9", "url_long": "http://example.com", "statistics": [1700000000] }
/// ```
///
/// Lookups need a valid, enabled API key but do not consume its quota.
pub async fn lookup_handler(
    State(state): State<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, AppError> {
    let Json(payload) = payload?;

    state.auth_service.authenticate(&payload.key).await?;

    payload.validate()?;

    let link = state.link_service.get_link(&payload.id).await?;

    let statistics = if payload.statistics {
        Some(state.stats_service.stats(&link.key).await?)
    } else {
        None
    };

    Ok(Json(LookupResponse {
        url_short: link.key,
        url_long: link.url,
        statistics,
    }))
}
