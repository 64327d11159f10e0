//! Link info page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::state::AppState;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Template for the link info page.
///
/// Renders `templates/link_info.html`.
#[derive(Template, WebTemplate)]
#[template(path = "link_info.html")]
pub struct LinkInfoTemplate {
    pub key: String,
    pub url: String,
    pub custom: bool,
    pub created_at: String,
    pub visits: usize,
    pub last_visit: Option<String>,
}

/// Renders what a key points to without following it.
///
/// # Endpoint
///
/// `GET /{key}+` (dispatched from [`crate::api::handlers::redirect_handler`])
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if no link has this key.
pub async fn link_info_handler(state: &AppState, key: &str) -> Result<Response, AppError> {
    let link = state.link_service.get_link(key).await?;
    let times = state.stats_service.stats(&link.key).await?;

    let last_visit = times
        .iter()
        .max()
        .and_then(|time| DateTime::<Utc>::from_timestamp(*time, 0))
        .map(|at| at.format(TIME_FORMAT).to_string());

    Ok(LinkInfoTemplate {
        key: link.key,
        url: link.url,
        custom: link.custom,
        created_at: link.created_at.format(TIME_FORMAT).to_string(),
        visits: times.len(),
        last_visit,
    }
    .into_response())
}
