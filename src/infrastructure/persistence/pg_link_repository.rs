//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{LINKS_KEY_CONSTRAINT, is_unique_violation_on};

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    key: String,
    url: String,
    api_key: Option<String>,
    custom: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.key,
            row.url,
            row.api_key,
            row.custom,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Key uniqueness is enforced by the `links_key_key` constraint, so a lost
/// insert race surfaces as [`AppError::KeyConflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links ("key", url, api_key, custom, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, "key", url, api_key, custom, created_at
            "#,
        )
        .bind(&new_link.key)
        .bind(&new_link.url)
        .bind(&new_link.api_key)
        .bind(new_link.custom)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, LINKS_KEY_CONSTRAINT) {
                AppError::key_conflict(new_link.key.clone())
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, "key", url, api_key, custom, created_at
            FROM links
            WHERE "key" = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, "key", url, api_key, custom, created_at
            FROM links
            WHERE url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn last_sequential_key(&self) -> Result<Option<String>, AppError> {
        let key = sqlx::query_scalar::<_, String>(
            r#"SELECT "key" FROM links WHERE NOT custom ORDER BY id DESC LIMIT 1"#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(key)
    }

    async fn count_created_since(
        &self,
        api_key: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links WHERE api_key = $1 AND created_at >= $2",
        )
        .bind(api_key)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
