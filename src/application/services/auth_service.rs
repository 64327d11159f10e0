//! API key authorization service.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::warn;

use crate::domain::entities::{API_KEY_LENGTH, ApiKey, Quota};
use crate::domain::repositories::{ApiKeyRepository, LinkRepository};
use crate::error::{AppError, DenyReason};

/// Service validating API keys and enforcing their daily quota.
///
/// A quota counts links created with the key since the most recent UTC
/// midnight. Requests that reuse an existing link do not consume quota.
///
/// Requests on the same quota-limited key are serialized from the count
/// until the caller drops the returned [`QuotaPermit`].
pub struct AuthService<
    R: ApiKeyRepository + ?Sized = dyn ApiKeyRepository,
    L: LinkRepository + ?Sized = dyn LinkRepository,
> {
    api_keys: Arc<R>,
    links: Arc<L>,
    quota_locks: DashMap<String, Arc<Mutex<()>>>,
}

/// An authorized API key, holding its quota slot while alive.
///
/// Keep it until the link is created, so that concurrent requests on the
/// same key observe each other's inserts.
#[derive(Debug)]
pub struct QuotaPermit {
    api_key: ApiKey,
    _slot: Option<OwnedMutexGuard<()>>,
}

impl QuotaPermit {
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn key(&self) -> &str {
        &self.api_key.key
    }
}

impl<R: ApiKeyRepository + ?Sized, L: LinkRepository + ?Sized> AuthService<R, L> {
    /// Creates a new authorization service.
    pub fn new(api_keys: Arc<R>, links: Arc<L>) -> Self {
        Self {
            api_keys,
            links,
            quota_locks: DashMap::new(),
        }
    }

    /// Checks that `key` exists and is not disabled. No quota is consumed or checked.
    ///
    /// # Errors
    ///
    /// - [`DenyReason::Unauthorized`] for a malformed or unknown key
    /// - [`DenyReason::Disabled`] for a key with a negative daily limit
    pub async fn authenticate(&self, key: &str) -> Result<ApiKey, AppError> {
        if key.chars().count() != API_KEY_LENGTH {
            return Err(deny(DenyReason::Unauthorized));
        }

        let api_key = self
            .api_keys
            .find(key)
            .await?
            .ok_or_else(|| deny(DenyReason::Unauthorized))?;

        if api_key.quota() == Quota::Disabled {
            return Err(deny(DenyReason::Disabled));
        }

        Ok(api_key)
    }

    /// Authenticates `key` and checks that it may create another link at `now`.
    ///
    /// # Errors
    ///
    /// Everything [`Self::authenticate`] returns, plus
    /// [`DenyReason::QuotaExceeded`] once the daily limit is used up.
    pub async fn authorize(&self, key: &str, now: DateTime<Utc>) -> Result<QuotaPermit, AppError> {
        let api_key = self.authenticate(key).await?;

        let Quota::Daily(limit) = api_key.quota() else {
            return Ok(QuotaPermit {
                api_key,
                _slot: None,
            });
        };

        let slot = self.quota_lock(&api_key.key).lock_owned().await;

        let used = self
            .links
            .count_created_since(&api_key.key, start_of_day(now))
            .await?;

        if used >= i64::from(limit) {
            return Err(deny(DenyReason::QuotaExceeded));
        }

        Ok(QuotaPermit {
            api_key,
            _slot: Some(slot),
        })
    }

    fn quota_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.quota_locks
            .entry(key.to_string())
            .or_default()
            .clone()
    }
}

/// The UTC midnight that opened the day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

fn deny(reason: DenyReason) -> AppError {
    warn!("API key denied: {}", reason.as_str());
    AppError::denied(reason)
}
