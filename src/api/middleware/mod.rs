//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting and observability middleware. API key checks run
//! inside the handlers because the key travels in the JSON body.

pub mod rate_limit;
pub mod tracing;
