use bell_dns_application::use_cases::{IngestZonesUseCase, IngestionSummary};
use bell_dns_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct ZoneIngestionJob {
    ingest: Arc<IngestZonesUseCase>,
    force: bool,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ZoneIngestionJob {
    pub fn new(ingest: Arc<IngestZonesUseCase>) -> Self {
        Self {
            ingest,
            force: false,
            interval_secs: 86400,
            shutdown: CancellationToken::new(),
        }
    }

    /// Ignore the reprocess threshold on every run.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run_once(&self) -> Result<IngestionSummary, DomainError> {
        let summary = self.ingest.execute(self.force).await?;
        info!(
            files = summary.files_seen,
            skipped_fresh = summary.skipped_fresh,
            ingested = summary.ingested,
            failed = summary.failed,
            records = summary.records,
            inserted = summary.records_inserted,
            "Zone ingestion run completed"
        );
        Ok(summary)
    }

    /// Runs immediately, then every interval until cancelled.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            force = self.force,
            "Starting zone ingestion job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ZoneIngestionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        tokio::select! {
                            biased;
                            _ = self.shutdown.cancelled() => {
                                info!("ZoneIngestionJob: run interrupted by shutdown");
                                break;
                            }
                            result = self.run_once() => {
                                if let Err(e) = result {
                                    error!(error = %e, "Zone ingestion run failed");
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}
