//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for managing short links.
///
/// Links are insert-only. Keys are unique across the whole table, URLs are not:
/// a URL may be reachable through its sequential key and any number of wishes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyConflict`] if the key is already stored.
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its exact key.
    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError>;

    /// Finds the earliest stored link for a URL.
    ///
    /// When several keys point to the same URL the one with the lowest id wins.
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError>;

    /// Returns the key of the most recently inserted non-custom link.
    async fn last_sequential_key(&self) -> Result<Option<String>, AppError>;

    /// Counts links created with `api_key` at or after `since`.
    async fn count_created_since(
        &self,
        api_key: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    /// Counts all stored links.
    async fn count(&self) -> Result<i64, AppError>;
}
