use async_trait::async_trait;
use bell_dns_application::ports::{BatchOutcome, ZoneRepository};
use bell_dns_domain::{DomainError, ProcessedTld, ZoneBatch};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::database::{db_error, format_timestamp, parse_timestamp};

pub struct SqliteZoneRepository {
    pool: SqlitePool,
}

impl SqliteZoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneRepository for SqliteZoneRepository {
    #[instrument(skip(self))]
    async fn processed_tlds(&self) -> Result<Vec<ProcessedTld>, DomainError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT tld, last_processed FROM processed_tlds",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load processed TLDs"))?;

        rows.into_iter()
            .map(|(tld, last_processed)| {
                Ok(ProcessedTld {
                    tld,
                    last_processed: parse_timestamp(&last_processed)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self, batch), fields(records = batch.len()))]
    async fn store_batch(&self, tld: &str, batch: &ZoneBatch) -> Result<BatchOutcome, DomainError> {
        let now = format_timestamp(Utc::now());
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin zone batch transaction"))?;

        let mut domain_ids = rustc_hash::FxHashMap::default();
        for name in batch.domains() {
            let nameservers = serde_json::to_string(batch.nameservers_for(name))
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

            // An owner whose NS records are outside this batch keeps its list.
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO domains (domain_name, tld, nameservers, last_updated)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT (domain_name, tld) DO UPDATE SET
                     nameservers = CASE WHEN excluded.nameservers = '[]'
                                        THEN domains.nameservers
                                        ELSE excluded.nameservers END,
                     last_updated = excluded.last_updated
                 RETURNING id",
            )
            .bind(name)
            .bind(tld)
            .bind(&nameservers)
            .bind(&now)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to upsert domain"))?;

            domain_ids.insert(name, id);
        }

        let mut inserted = 0;
        for record in &batch.records {
            let Some(&domain_id) = domain_ids.get(record.domain_name()) else {
                continue;
            };
            let result = sqlx::query(
                "INSERT INTO dns_records (domain_id, record_type, record_data, ttl, source, last_updated)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT DO NOTHING",
            )
            .bind(domain_id)
            .bind(record.record_type().as_str())
            .bind(record.record_data())
            .bind(i64::from(record.ttl()))
            .bind(record.source.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert zone record"))?;

            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit zone batch"))?;

        debug!(tld, domains = domain_ids.len(), inserted, "Zone batch committed");
        Ok(BatchOutcome {
            domains: domain_ids.len(),
            records_inserted: inserted,
        })
    }

    #[instrument(skip(self))]
    async fn mark_processed(&self, tld: &str) -> Result<ProcessedTld, DomainError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO processed_tlds (tld, last_processed) VALUES (?, ?)
             ON CONFLICT (tld) DO UPDATE SET last_processed = excluded.last_processed",
        )
        .bind(tld)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark TLD processed"))?;

        Ok(ProcessedTld {
            tld: tld.to_string(),
            last_processed: parse_timestamp(&format_timestamp(now))?,
        })
    }
}
