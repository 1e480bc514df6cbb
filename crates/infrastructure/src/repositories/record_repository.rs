use async_trait::async_trait;
use bell_dns_application::ports::RecordRepository;
use bell_dns_domain::{DnsRecord, DomainError, RecordSource, RecordType};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::instrument;

use crate::database::{db_error, format_timestamp, parse_timestamp};

type RecordRow = (i64, String, String, i64, String, String);

pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: RecordRow) -> Result<DnsRecord, DomainError> {
        let (domain_id, record_type, record_data, ttl, source, last_updated) = row;

        let record_type = RecordType::from_str(&record_type).map_err(DomainError::DatabaseError)?;
        let source = RecordSource::parse(&source)
            .ok_or_else(|| DomainError::DatabaseError(format!("unknown record source '{source}'")))?;

        Ok(DnsRecord {
            domain_id,
            record_type,
            record_data,
            ttl: u32::try_from(ttl).unwrap_or(u32::MAX),
            source,
            last_updated: Some(parse_timestamp(&last_updated)?),
        })
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn store_records(&self, domain_id: i64, records: &[DnsRecord]) -> Result<u64, DomainError> {
        let now = format_timestamp(Utc::now());
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin record transaction"))?;

        let mut inserted = 0;
        for record in records {
            let result = sqlx::query(
                "INSERT INTO dns_records (domain_id, record_type, record_data, ttl, source, last_updated)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT DO NOTHING",
            )
            .bind(domain_id)
            .bind(record.record_type.as_str())
            .bind(&record.record_data)
            .bind(i64::from(record.ttl))
            .bind(record.source.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert record"))?;

            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit records"))?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn find_by_domain(
        &self,
        domain_name: &str,
        record_types: &[RecordType],
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT r.domain_id, r.record_type, r.record_data, r.ttl, r.source, r.last_updated
             FROM dns_records r
             JOIN domains d ON d.id = r.domain_id
             WHERE d.domain_name = ",
        );
        query.push_bind(domain_name);

        if !record_types.is_empty() {
            query.push(" AND r.record_type IN (");
            let mut separated = query.separated(", ");
            for record_type in record_types {
                separated.push_bind(record_type.as_str());
            }
            separated.push_unseparated(")");
        }
        query.push(" ORDER BY r.record_type, r.id");

        let rows = query
            .build_query_as::<RecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query records"))?;

        rows.into_iter().map(Self::row_to_record).collect()
    }
}
