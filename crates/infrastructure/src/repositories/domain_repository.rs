use async_trait::async_trait;
use bell_dns_application::ports::DomainRepository;
use bell_dns_domain::{Domain, DomainError};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::database::{db_error, format_timestamp, parse_timestamp};

type DomainRow = (i64, String, String, String, Option<String>);

pub struct SqliteDomainRepository {
    pool: SqlitePool,
}

impl SqliteDomainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_domain(row: DomainRow) -> Result<Domain, DomainError> {
        let (id, name, tld, nameservers, last_updated) = row;

        let nameservers: Vec<String> = serde_json::from_str(&nameservers).map_err(|e| {
            DomainError::DatabaseError(format!("invalid nameserver list for {name}: {e}"))
        })?;
        let last_updated = last_updated.as_deref().map(parse_timestamp).transpose()?;

        Ok(Domain {
            id,
            name,
            tld,
            nameservers,
            last_updated,
        })
    }
}

#[async_trait]
impl DomainRepository for SqliteDomainRepository {
    #[instrument(skip(self))]
    async fn fetch_stale_page(
        &self,
        after_id: Option<i64>,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Domain>, DomainError> {
        let rows = sqlx::query_as::<_, DomainRow>(
            "SELECT id, domain_name, tld, nameservers, last_updated
             FROM domains
             WHERE (?1 IS NULL OR id > ?1)
               AND nameservers <> '[]'
               AND (last_updated IS NULL OR last_updated < ?2)
             ORDER BY id
             LIMIT ?3",
        )
        .bind(after_id)
        .bind(format_timestamp(stale_before))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch stale domain page"))?;

        rows.into_iter().map(Self::row_to_domain).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(
            "SELECT id, domain_name, tld, nameservers, last_updated
             FROM domains WHERE domain_name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to query domain by name"))?;

        row.map(Self::row_to_domain).transpose()
    }
}
