//! Repository trait for API key lookup and administration.

use crate::domain::entities::ApiKey;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API keys.
///
/// The HTTP surface only reads keys. Creation and limit changes are driven by
/// the `admin` binary.
///
/// # Examples
///
/// See integration tests: `tests/repository_api_key.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Finds an API key by its exact value.
    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError>;

    /// Stores a new API key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyConflict`] if the key already exists.
    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, AppError>;

    /// Lists all API keys ordered by key.
    async fn list(&self) -> Result<Vec<ApiKey>, AppError>;

    /// Replaces the daily limit of a key.
    ///
    /// Returns `Ok(false)` if the key does not exist.
    async fn set_daily_limit(&self, key: &str, daily_limit: i32) -> Result<bool, AppError>;
}
