use bell_dns_domain::config::ZonesConfig;
use bell_dns_domain::{DomainError, ProcessedTld, ZoneFile};
use chrono::Utc;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::ZoneFileIngestor;
use crate::ports::{ZoneArchive, ZoneRepository};
use crate::services::WorkerPool;

/// Totals of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionSummary {
    pub files_seen: usize,
    pub skipped_fresh: usize,
    pub ingested: usize,
    pub failed: usize,
    pub records: u64,
    pub records_inserted: u64,
}

#[derive(Default)]
struct Counters {
    ingested: AtomicUsize,
    failed: AtomicUsize,
    records: AtomicU64,
    records_inserted: AtomicU64,
}

/// Zone ingestion engine: every due zone file goes through the worker pool.
pub struct IngestZonesUseCase {
    archive: Arc<dyn ZoneArchive>,
    zone_repo: Arc<dyn ZoneRepository>,
    ingestor: Arc<ZoneFileIngestor>,
    pool: WorkerPool,
    freshness_window: chrono::Duration,
}

impl IngestZonesUseCase {
    pub fn new(
        archive: Arc<dyn ZoneArchive>,
        zone_repo: Arc<dyn ZoneRepository>,
        config: &ZonesConfig,
    ) -> Self {
        let ingestor = Arc::new(ZoneFileIngestor::new(
            Arc::clone(&archive),
            Arc::clone(&zone_repo),
            config.batch_size,
        ));
        let hours = i64::try_from(config.reprocess_threshold_hours).unwrap_or(i64::MAX);

        Self {
            archive,
            zone_repo,
            ingestor,
            pool: WorkerPool::new("zone-ingestion", config.max_concurrent),
            freshness_window: chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Ingests every zone file not processed within the freshness window, or
    /// every file when `force` is set.
    ///
    /// Per-file failures are logged and counted; only listing the archive or
    /// loading the processed-TLD snapshot fails the run.
    pub async fn execute(&self, force: bool) -> Result<IngestionSummary, DomainError> {
        let files = self.archive.list().await?;
        let processed: FxHashMap<String, ProcessedTld> = self
            .zone_repo
            .processed_tlds()
            .await?
            .into_iter()
            .map(|p| (p.tld.clone(), p))
            .collect();

        let now = Utc::now();
        let mut summary = IngestionSummary {
            files_seen: files.len(),
            ..Default::default()
        };

        let mut due: Vec<ZoneFile> = Vec::with_capacity(files.len());
        for file in files {
            let fresh = processed
                .get(&file.tld)
                .is_some_and(|p| p.is_fresh(now, self.freshness_window));
            if fresh && !force {
                info!(tld = %file.tld, "Zone recently processed; skipping");
                summary.skipped_fresh += 1;
            } else {
                due.push(file);
            }
        }

        info!(
            files = summary.files_seen,
            due = due.len(),
            force,
            "Starting zone ingestion"
        );

        let counters = Arc::new(Counters::default());
        let report = self
            .pool
            .run(due, |file| {
                let ingestor = Arc::clone(&self.ingestor);
                let zone_repo = Arc::clone(&self.zone_repo);
                let counters = Arc::clone(&counters);
                async move {
                    info!(tld = %file.tld, path = %file.path.display(), "Ingesting zone file");

                    let outcome = match ingestor.ingest(&file).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!(tld = %file.tld, error = %e, "Zone file ingestion failed; will retry on next run");
                            counters.failed.fetch_add(1, Ordering::Relaxed);
                            return;
                        }
                    };

                    if let Err(e) = zone_repo.mark_processed(&file.tld).await {
                        warn!(tld = %file.tld, error = %e, "Failed to mark zone as processed");
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                        return;
                    }

                    counters.ingested.fetch_add(1, Ordering::Relaxed);
                    counters
                        .records
                        .fetch_add(outcome.records as u64, Ordering::Relaxed);
                    counters
                        .records_inserted
                        .fetch_add(outcome.records_inserted, Ordering::Relaxed);
                    info!(
                        tld = %file.tld,
                        batches = outcome.batches,
                        records = outcome.records,
                        inserted = outcome.records_inserted,
                        domains = outcome.domains,
                        "Zone file ingested"
                    );
                }
            })
            .await;

        summary.ingested = counters.ingested.load(Ordering::Relaxed);
        summary.failed = counters.failed.load(Ordering::Relaxed) + report.panicked;
        summary.records = counters.records.load(Ordering::Relaxed);
        summary.records_inserted = counters.records_inserted.load(Ordering::Relaxed);

        info!(
            ingested = summary.ingested,
            skipped = summary.skipped_fresh,
            failed = summary.failed,
            records = summary.records,
            "Zone ingestion finished"
        );
        Ok(summary)
    }
}
