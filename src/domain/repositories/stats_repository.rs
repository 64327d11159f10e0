//! Repository trait for access event tracking.

use crate::domain::entities::AccessEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only access log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends an access event for the link stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` when the key exists and the event was stored
    /// - `Ok(None)` when no link has that key
    async fn record_access(&self, key: &str, time: i64) -> Result<Option<AccessEvent>, AppError>;

    /// Lists access events of a link in insertion order.
    async fn list_by_link(&self, link_id: i64) -> Result<Vec<AccessEvent>, AppError>;
}
