//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AccessEventRow {
    link_id: i64,
    time: i64,
}

impl From<AccessEventRow> for AccessEvent {
    fn from(row: AccessEventRow) -> Self {
        AccessEvent::new(row.link_id, row.time)
    }
}

/// PostgreSQL repository for the access log.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_access(&self, key: &str, time: i64) -> Result<Option<AccessEvent>, AppError> {
        // Lookup and insert in one statement: no row inserted means no such key.
        let row = sqlx::query_as::<_, AccessEventRow>(
            r#"
            INSERT INTO stats (link_id, "time")
            SELECT id, $2 FROM links WHERE "key" = $1
            RETURNING link_id, "time"
            "#,
        )
        .bind(key)
        .bind(time)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AccessEvent::from))
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<AccessEvent>, AppError> {
        let rows = sqlx::query_as::<_, AccessEventRow>(
            r#"SELECT link_id, "time" FROM stats WHERE link_id = $1 ORDER BY id"#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AccessEvent::from).collect())
    }
}
