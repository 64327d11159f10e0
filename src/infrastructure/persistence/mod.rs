//! Repository implementations.
//!
//! Concrete implementations of domain repository traits: PostgreSQL via SQLx
//! for production, and an in-process store for tests.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgStatsRepository`] - Access event recording
//! - [`PgApiKeyRepository`] - API key lookup and administration
//! - [`MemoryStore`] - All of the above, in memory

pub mod memory_store;
pub mod pg_api_key_repository;
pub mod pg_link_repository;
pub mod pg_stats_repository;

pub use memory_store::MemoryStore;
pub use pg_api_key_repository::PgApiKeyRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
