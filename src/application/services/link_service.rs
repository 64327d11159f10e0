//! Link allocation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::codec::{SEQUENCE_START, decode, encode, is_reserved, validate_wish};
use crate::utils::url_validator::validate_long_url;

/// How many sequence values may be skipped because custom links or other
/// routes already hold them.
const MAX_SEQUENCE_SKIPS: usize = 64;

/// Service deciding which key a long URL is stored under.
///
/// A wish is honored when it is free, reused when it already points to the
/// same URL, and refused with [`AppError::KeyConflict`] otherwise. Without a
/// wish the URL is deduplicated against stored links, and a new key is taken
/// from the sequence of non-custom keys.
///
/// Sequential allocation runs under `sequence_lock`, so two concurrent
/// requests can never compute the same next key. Wish allocation relies on
/// the store's unique key constraint instead.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<L>,
    sequence_lock: Mutex<()>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>) -> Self {
        Self {
            repository,
            sequence_lock: Mutex::new(()),
        }
    }

    /// Assigns a key to `url` and returns the stored link.
    ///
    /// `api_key` is recorded on newly created links for quota accounting.
    /// Reused links are returned as stored.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an unacceptable URL or wish
    /// - [`AppError::KeyConflict`] if the wish maps to a different URL
    /// - [`AppError::Store`] on persistence failures
    pub async fn allocate(
        &self,
        url: &str,
        wish: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Link, AppError> {
        validate_long_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        match wish {
            Some(wish) => self.allocate_wish(url, wish, api_key).await,
            None => self.allocate_sequential(url, api_key).await,
        }
    }

    async fn allocate_wish(
        &self,
        url: &str,
        wish: &str,
        api_key: Option<&str>,
    ) -> Result<Link, AppError> {
        validate_wish(wish)?;

        if let Some(existing) = self.repository.find_by_key(wish).await? {
            return reuse_wish(existing, url);
        }

        let new_link = NewLink::custom(
            wish.to_string(),
            url.to_string(),
            api_key.map(str::to_owned),
        );

        match self.repository.create(new_link).await {
            Ok(link) => {
                info!(key = %link.key, "Custom link created");
                Ok(link)
            }
            Err(AppError::KeyConflict { .. }) => {
                // Another request inserted the wish between lookup and insert.
                let existing = self.repository.find_by_key(wish).await?.ok_or_else(|| {
                    AppError::store(format!("Key '{}' conflicted but cannot be read back", wish))
                })?;
                reuse_wish(existing, url)
            }
            Err(e) => Err(e),
        }
    }

    async fn allocate_sequential(
        &self,
        url: &str,
        api_key: Option<&str>,
    ) -> Result<Link, AppError> {
        let _guard = self.sequence_lock.lock().await;

        if let Some(existing) = self.repository.find_by_url(url).await? {
            debug!(key = %existing.key, "URL already shortened");
            return Ok(existing);
        }

        let mut next = self.next_sequence_value().await?;

        for _ in 0..MAX_SEQUENCE_SKIPS {
            let key = encode(next);

            if is_reserved(&key) {
                debug!("Sequential key {} is a reserved route segment, skipping", key);
            } else {
                let new_link =
                    NewLink::sequential(key, url.to_string(), api_key.map(str::to_owned));

                match self.repository.create(new_link).await {
                    Ok(link) => {
                        info!(key = %link.key, "Sequential link created");
                        return Ok(link);
                    }
                    Err(AppError::KeyConflict { key }) => {
                        debug!("Sequential key {} is held by a custom link, skipping", key);
                    }
                    Err(e) => return Err(e),
                }
            }

            next = next
                .checked_add(1)
                .ok_or_else(|| AppError::store("Key sequence exhausted"))?;
        }

        Err(AppError::store(format!(
            "No free sequential key after {} attempts",
            MAX_SEQUENCE_SKIPS
        )))
    }

    /// Value following the last non-custom key, or [`SEQUENCE_START`] on an empty sequence.
    async fn next_sequence_value(&self) -> Result<u64, AppError> {
        let Some(last) = self.repository.last_sequential_key().await? else {
            return Ok(SEQUENCE_START);
        };

        let value = decode(&last).map_err(|_| {
            AppError::store(format!("Stored sequential key '{}' cannot be decoded", last))
        })?;

        value
            .checked_add(1)
            .ok_or_else(|| AppError::store("Key sequence exhausted"))
    }

    /// Retrieves a link without recording an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this key.
    pub async fn get_link(&self, key: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found(key))
    }

    /// Counts stored links. Used by the health check.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn reuse_wish(existing: Link, url: &str) -> Result<Link, AppError> {
    if existing.url == url {
        debug!(key = %existing.key, "Wish already maps to this URL");
        Ok(existing)
    } else {
        warn!(key = %existing.key, "Wish is taken by a different URL");
        Err(AppError::key_conflict(existing.key))
    }
}
