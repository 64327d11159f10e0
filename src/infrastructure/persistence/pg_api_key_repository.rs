//! PostgreSQL implementation of API key repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ApiKey;
use crate::domain::repositories::ApiKeyRepository;
use crate::error::AppError;
use crate::utils::db_error::{API_KEY_CONSTRAINT, is_unique_violation_on};

#[derive(sqlx::FromRow)]
struct ApiKeyRow {
    key: String,
    daily_limit: i32,
}

impl From<ApiKeyRow> for ApiKey {
    fn from(row: ApiKeyRow) -> Self {
        ApiKey::new(row.key, row.daily_limit)
    }
}

/// PostgreSQL repository for API keys.
pub struct PgApiKeyRepository {
    pool: Arc<PgPool>,
}

impl PgApiKeyRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PgApiKeyRepository {
    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"SELECT "key", daily_limit FROM api WHERE "key" = $1"#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ApiKey::from))
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, AppError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            INSERT INTO api ("key", daily_limit)
            VALUES ($1, $2)
            RETURNING "key", daily_limit
            "#,
        )
        .bind(&api_key.key)
        .bind(api_key.daily_limit)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, API_KEY_CONSTRAINT) {
                AppError::key_conflict(api_key.key.clone())
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<ApiKey>, AppError> {
        let rows = sqlx::query_as::<_, ApiKeyRow>(
            r#"SELECT "key", daily_limit FROM api ORDER BY "key""#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ApiKey::from).collect())
    }

    async fn set_daily_limit(&self, key: &str, daily_limit: i32) -> Result<bool, AppError> {
        let result = sqlx::query(r#"UPDATE api SET daily_limit = $2 WHERE "key" = $1"#)
            .bind(key)
            .bind(daily_limit)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
