//! Repository trait definitions for the domain layer.
//!
//! These traits are the store contract. Services depend on them only, so the
//! same business rules run against PostgreSQL in production and against the
//! in-process store in tests.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link insertion and lookup
//! - [`StatsRepository`] - Access event recording
//! - [`ApiKeyRepository`] - API key lookup and administration

pub mod api_key_repository;
pub mod link_repository;
pub mod stats_repository;

pub use api_key_repository::ApiKeyRepository;
pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use api_key_repository::MockApiKeyRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
