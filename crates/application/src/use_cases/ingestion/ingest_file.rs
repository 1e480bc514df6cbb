use bell_dns_domain::{DomainError, ZoneBatch, ZoneFile};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::ports::{ZoneArchive, ZoneRepository};
use crate::services::ZoneParser;

/// Batches parsed ahead of the storage writer.
const PARSED_BATCHES_IN_FLIGHT: usize = 2;

/// Counters for one ingested zone file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub batches: usize,
    pub records: usize,
    pub domains: usize,
    pub records_inserted: u64,
}

/// Streams one zone file into storage, one transaction per batch.
///
/// Decompression and parsing run on the blocking pool and hand batches over a
/// bounded channel, so at most a couple of batches are held in memory.
pub struct ZoneFileIngestor {
    archive: Arc<dyn ZoneArchive>,
    zone_repo: Arc<dyn ZoneRepository>,
    batch_size: usize,
}

impl ZoneFileIngestor {
    pub fn new(
        archive: Arc<dyn ZoneArchive>,
        zone_repo: Arc<dyn ZoneRepository>,
        batch_size: usize,
    ) -> Self {
        Self {
            archive,
            zone_repo,
            batch_size,
        }
    }

    /// Ingests `file`. Batches committed before a parse or storage error stay
    /// committed; the error aborts the rest of the file.
    pub async fn ingest(&self, file: &ZoneFile) -> Result<FileOutcome, DomainError> {
        let (tx, mut rx) = mpsc::channel::<ZoneBatch>(PARSED_BATCHES_IN_FLIGHT);

        let archive = Arc::clone(&self.archive);
        let source = file.clone();
        let batch_size = self.batch_size;
        let producer = tokio::task::spawn_blocking(move || -> Result<usize, DomainError> {
            let reader = archive.open(&source)?;
            ZoneParser::new(reader, &source.tld, batch_size).for_each_batch(|batch| {
                tx.blocking_send(batch)
                    .map_err(|_| DomainError::IoError("batch writer stopped".to_string()))
            })
        });

        let mut outcome = FileOutcome::default();
        let mut store_error = None;
        while let Some(batch) = rx.recv().await {
            match self.zone_repo.store_batch(&file.tld, &batch).await {
                Ok(stored) => {
                    outcome.batches += 1;
                    outcome.records += batch.len();
                    outcome.domains += stored.domains;
                    outcome.records_inserted += stored.records_inserted;
                    debug!(
                        tld = %file.tld,
                        batch = outcome.batches,
                        records = batch.len(),
                        inserted = stored.records_inserted,
                        "Zone batch stored"
                    );
                }
                Err(e) => {
                    store_error = Some(e);
                    break;
                }
            }
        }
        // Closing the receiver makes a still-running parser stop at its next send.
        drop(rx);

        let parsed = producer
            .await
            .map_err(|e| DomainError::IoError(format!("zone parser task failed: {e}")))?;

        if let Some(e) = store_error {
            return Err(e);
        }
        parsed?;
        Ok(outcome)
    }
}
