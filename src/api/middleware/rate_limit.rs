//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters applied per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Redirects and the info view: 2 requests per second, burst of 100.
pub const PUBLIC: RateLimit = RateLimit {
    per_second: 2,
    burst_size: 100,
};

/// `/api/v1/*`: 1 request per second, burst of 10.
pub const API: RateLimit = RateLimit {
    per_second: 1,
    burst_size: 10,
};

/// Wraps `router` in a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address (requires
///   `into_make_service_with_connect_info`)
/// - `behind_proxy = true`: `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
///   falling back to the peer address. Enable only behind a trusted proxy.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api_routes(), rate_limit::API, config.behind_proxy);
/// ```
pub fn apply<S>(router: Router<S>, limit: RateLimit, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(layer(limit, SmartIpKeyExtractor))
    } else {
        router.layer(layer(limit, PeerIpKeyExtractor))
    }
}

fn layer<K: KeyExtractor>(
    limit: RateLimit,
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(limit.per_second)
            .burst_size(limit.burst_size)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_limit_is_stricter() {
        assert!(API.per_second <= PUBLIC.per_second);
        assert!(API.burst_size < PUBLIC.burst_size);
    }
}
