//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a small API over key allocation, resolution and authorization.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Key allocation and link lookup
//! - [`services::stats_service::StatsService`] - Resolution and access statistics
//! - [`services::auth_service::AuthService`] - API key validation and daily quotas

pub mod services;
