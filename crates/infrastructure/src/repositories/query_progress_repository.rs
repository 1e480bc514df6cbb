use async_trait::async_trait;
use bell_dns_application::ports::QueryProgressRepository;
use bell_dns_domain::{DomainError, QueryProgress};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::database::{db_error, format_timestamp, parse_timestamp};

pub struct SqliteQueryProgressRepository {
    pool: SqlitePool,
}

impl SqliteQueryProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryProgressRepository for SqliteQueryProgressRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<QueryProgress, DomainError> {
        let row = sqlx::query_as::<_, (Option<i64>, Option<String>)>(
            "SELECT last_domain_id, updated_at FROM query_progress WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load query progress"))?;

        let Some((last_domain_id, updated_at)) = row else {
            return Ok(QueryProgress::default());
        };

        Ok(QueryProgress {
            last_domain_id,
            updated_at: updated_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }

    #[instrument(skip(self))]
    async fn advance(&self, domain_id: i64) -> Result<i64, DomainError> {
        // Single statement: concurrent workers can only move the cursor forward.
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO query_progress (id, last_domain_id, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT (id) DO UPDATE SET
                 last_domain_id = MAX(COALESCE(query_progress.last_domain_id, excluded.last_domain_id),
                                      excluded.last_domain_id),
                 updated_at = excluded.updated_at
             RETURNING last_domain_id",
        )
        .bind(domain_id)
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to advance query progress"))
    }
}
