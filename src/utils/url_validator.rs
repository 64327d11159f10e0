//! Long URL validation.
//!
//! URLs are stored exactly as submitted so that deduplication compares the
//! caller's string. Validation only decides whether the string is acceptable.

use url::Url;

/// Longest accepted long URL in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must not contain whitespace or control characters")]
    ForbiddenCharacters,

    #[error("URL is longer than {MAX_URL_LENGTH} bytes")]
    TooLong,
}

/// Checks that `input` is an absolute HTTP(S) URL usable as a redirect target.
///
/// # Errors
///
/// - [`UrlValidationError::TooLong`] above [`MAX_URL_LENGTH`]
/// - [`UrlValidationError::ForbiddenCharacters`] for whitespace or control characters,
///   which would not survive a `Location` header
/// - [`UrlValidationError::InvalidFormat`] for unparsable or relative URLs
/// - [`UrlValidationError::UnsupportedProtocol`] for anything but `http`/`https`
///   (`javascript:`, `data:`, `file:`, ...)
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlValidationError::ForbiddenCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(())
}
