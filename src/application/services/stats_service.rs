//! Link resolution and access statistics service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service resolving keys to URLs and recording every resolution.
///
/// Lookups go through the redirect cache first. Recording is always done
/// against the store, so a cache hit for a key that is no longer stored
/// still yields [`AppError::NotFound`].
pub struct StatsService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    S: StatsRepository + ?Sized = dyn StatsRepository,
> {
    links: Arc<L>,
    stats: Arc<S>,
    cache: Arc<dyn CacheService>,
}

impl<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> StatsService<L, S> {
    /// Creates a new statistics service.
    pub fn new(links: Arc<L>, stats: Arc<S>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            links,
            stats,
            cache,
        }
    }

    /// Returns the URL for `key` and records one access at `at` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this key.
    /// Returns [`AppError::Store`] on persistence failures.
    pub async fn resolve(&self, key: &str, at: i64) -> Result<String, AppError> {
        let url = self.lookup_url(key).await?;
        self.record_access(key, at).await?;
        Ok(url)
    }

    async fn lookup_url(&self, key: &str) -> Result<String, AppError> {
        match self.cache.get_url(key).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", key, e),
        }

        let link = self
            .links
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found(key))?;

        if let Err(e) = self.cache.set_url(key, &link.url, None).await {
            warn!("Failed to cache {}: {}", key, e);
        }

        Ok(link.url)
    }

    /// Appends an access event for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this key.
    pub async fn record_access(&self, key: &str, at: i64) -> Result<AccessEvent, AppError> {
        let event = self
            .stats
            .record_access(key, at)
            .await?
            .ok_or_else(|| AppError::not_found(key))?;

        debug!(key, link_id = event.link_id, "Access recorded");
        Ok(event)
    }

    /// Returns the access times of `key` in recording order.
    ///
    /// An existing link that was never resolved yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this key.
    pub async fn stats(&self, key: &str) -> Result<Vec<i64>, AppError> {
        let link = self
            .links
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found(key))?;

        let events = self.stats.list_by_link(link.id).await?;

        Ok(events.into_iter().map(|event| event.time).collect())
    }
}
