//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a URL.
///
/// A missing `key` deserializes as empty and is refused as unauthorized.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom key. An empty string means no wish.
    #[validate(length(max = 32, message = "Wish must be at most 32 characters"))]
    pub wish: Option<String>,

    #[serde(default)]
    pub key: String,
}

impl ShortenRequest {
    pub fn wish(&self) -> Option<&str> {
        self.wish.as_deref().filter(|wish| !wish.is_empty())
    }
}

/// Stored mapping returned to the caller.
///
/// `wish` tells whether the key is a custom one.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub url_long: String,
    pub url_short: String,
    pub wish: bool,
}

impl From<Link> for ShortenResponse {
    fn from(link: Link) -> Self {
        Self {
            url_long: link.url,
            url_short: link.key,
            wish: link.custom,
        }
    }
}
