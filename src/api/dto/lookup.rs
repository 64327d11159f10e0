//! DTOs for the key lookup endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for the URL behind a key, optionally with its access times.
#[derive(Debug, Deserialize, Validate)]
pub struct LookupRequest {
    /// The short key to look up.
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,

    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub statistics: bool,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub url_short: String,
    pub url_long: String,

    /// Access times in Unix seconds, in recording order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Vec<i64>>,
}
