//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::domain::repositories::{ApiKeyRepository, LinkRepository, StatsRepository};
use crate::infrastructure::cache::CacheService;

/// Services wired against one store.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds the services from repository implementations.
    ///
    /// The same `links` repository backs allocation, resolution and quota
    /// counting, so all three see one key space.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        stats: Arc<dyn StatsRepository>,
        api_keys: Arc<dyn ApiKeyRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(links.clone())),
            stats_service: Arc::new(StatsService::new(links.clone(), stats, cache.clone())),
            auth_service: Arc::new(AuthService::new(api_keys, links)),
            cache,
        }
    }
}
