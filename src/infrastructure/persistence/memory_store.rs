//! In-process implementation of every repository trait.
//!
//! Used by the HTTP integration tests and for running the service logic
//! without a database. Data lives as long as the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{AccessEvent, ApiKey, Link, NewLink};
use crate::domain::repositories::{ApiKeyRepository, LinkRepository, StatsRepository};
use crate::error::AppError;

/// Store keeping links, access events and API keys in `DashMap`s.
///
/// Link keys are inserted through the map's entry API, which gives the same
/// insert-or-fail guarantee as the unique constraint in PostgreSQL.
#[derive(Debug)]
pub struct MemoryStore {
    links: DashMap<String, Link>,
    events: DashMap<i64, Vec<AccessEvent>>,
    api_keys: DashMap<String, ApiKey>,
    next_link_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            events: DashMap::new(),
            api_keys: DashMap::new(),
            next_link_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.key.clone()) {
            Entry::Occupied(_) => Err(AppError::key_conflict(new_link.key)),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.next_link_id.fetch_add(1, Ordering::SeqCst),
                    new_link.key,
                    new_link.url,
                    new_link.api_key,
                    new_link.custom,
                    new_link.created_at,
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(key).map(|link| link.value().clone()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .iter()
            .filter(|link| link.url == url)
            .min_by_key(|link| link.id)
            .map(|link| link.value().clone()))
    }

    async fn last_sequential_key(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .links
            .iter()
            .filter(|link| !link.custom)
            .max_by_key(|link| link.id)
            .map(|link| link.key.clone()))
    }

    async fn count_created_since(
        &self,
        api_key: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = self
            .links
            .iter()
            .filter(|link| link.api_key.as_deref() == Some(api_key) && link.created_at >= since)
            .count();

        Ok(count as i64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.len() as i64)
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record_access(&self, key: &str, time: i64) -> Result<Option<AccessEvent>, AppError> {
        let Some(link_id) = self.links.get(key).map(|link| link.id) else {
            return Ok(None);
        };

        let event = AccessEvent::new(link_id, time);
        self.events.entry(link_id).or_default().push(event);

        Ok(Some(event))
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<AccessEvent>, AppError> {
        Ok(self
            .events
            .get(&link_id)
            .map(|events| events.value().clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ApiKeyRepository for MemoryStore {
    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        Ok(self.api_keys.get(key).map(|api_key| api_key.value().clone()))
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, AppError> {
        match self.api_keys.entry(api_key.key.clone()) {
            Entry::Occupied(_) => Err(AppError::key_conflict(api_key.key)),
            Entry::Vacant(slot) => {
                slot.insert(api_key.clone());
                Ok(api_key)
            }
        }
    }

    async fn list(&self) -> Result<Vec<ApiKey>, AppError> {
        let mut keys: Vec<ApiKey> = self
            .api_keys
            .iter()
            .map(|api_key| api_key.value().clone())
            .collect();
        keys.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(keys)
    }

    async fn set_daily_limit(&self, key: &str, daily_limit: i32) -> Result<bool, AppError> {
        Ok(match self.api_keys.get_mut(key) {
            Some(mut api_key) => {
                api_key.daily_limit = daily_limit;
                true
            }
            None => false,
        })
    }
}
