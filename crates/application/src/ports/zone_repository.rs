use async_trait::async_trait;
use bell_dns_domain::{DomainError, ProcessedTld, ZoneBatch};

/// Counters for one committed ingestion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub domains: usize,
    pub records_inserted: u64,
}

/// Storage operations of zone ingestion.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Last-processed timestamps of every ingested TLD.
    async fn processed_tlds(&self) -> Result<Vec<ProcessedTld>, DomainError>;

    /// Stores one batch in a single transaction.
    ///
    /// Upserts a domain row per distinct owner (refreshing its nameserver list
    /// and freshness timestamp) and inserts every record, ignoring records
    /// that already exist. Nothing is written when an error is returned.
    async fn store_batch(&self, tld: &str, batch: &ZoneBatch) -> Result<BatchOutcome, DomainError>;

    /// Upserts the processed timestamp of `tld` to now.
    async fn mark_processed(&self, tld: &str) -> Result<ProcessedTld, DomainError>;
}
