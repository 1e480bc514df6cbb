use bell_dns_application::use_cases::{ResolutionSummary, ResolveDomainsUseCase};
use bell_dns_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodic sweep of the stale-domain backlog.
///
/// An interrupted sweep loses nothing: the cursor already covers every
/// domain that finished, and the next sweep resumes after it.
pub struct ActiveResolutionJob {
    resolve: Arc<ResolveDomainsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ActiveResolutionJob {
    pub fn new(resolve: Arc<ResolveDomainsUseCase>) -> Self {
        Self {
            resolve,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run_once(&self) -> Result<ResolutionSummary, DomainError> {
        let summary = self.resolve.execute().await?;
        info!(
            pages = summary.pages,
            domains = summary.domains,
            skipped = summary.skipped,
            failed = summary.failed,
            records = summary.records_stored,
            cursor = ?summary.cursor,
            "Active resolution run completed"
        );
        Ok(summary)
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting active resolution job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ActiveResolutionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        tokio::select! {
                            biased;
                            _ = self.shutdown.cancelled() => {
                                info!("ActiveResolutionJob: run interrupted by shutdown");
                                break;
                            }
                            result = self.run_once() => {
                                if let Err(e) = result {
                                    error!(error = %e, "Active resolution run failed");
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}
