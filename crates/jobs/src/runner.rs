use crate::{ActiveResolutionJob, ZoneIngestionJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Central orchestrator for the background engines.
///
/// Use the builder pattern to register jobs, then call `.start()` once and
/// `.shutdown()` to stop them.
///
/// # Example
///
/// ```rust,ignore
/// let running = JobRunner::new()
///     .with_zone_ingestion(ZoneIngestionJob::new(ingest).with_interval(86400))
///     .with_active_resolution(ActiveResolutionJob::new(resolve).with_interval(3600))
///     .start();
/// tokio::signal::ctrl_c().await?;
/// running.shutdown().await;
/// ```
pub struct JobRunner {
    zone_ingestion: Option<ZoneIngestionJob>,
    active_resolution: Option<ActiveResolutionJob>,
    shutdown: CancellationToken,
}

/// Handles of started jobs sharing one cancellation token.
pub struct RunningJobs {
    handles: Vec<JoinHandle<()>>,
    shutdown: CancellationToken,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            zone_ingestion: None,
            active_resolution: None,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_zone_ingestion(mut self, job: ZoneIngestionJob) -> Self {
        self.zone_ingestion = Some(job);
        self
    }

    pub fn with_active_resolution(mut self, job: ActiveResolutionJob) -> Self {
        self.active_resolution = Some(job);
        self
    }

    /// Parent token; every registered job stops when it is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Start all registered background jobs.
    pub fn start(self) -> RunningJobs {
        info!("Starting background job runner");

        let mut handles = Vec::with_capacity(2);
        if let Some(job) = self.zone_ingestion {
            let job = job.with_cancellation(self.shutdown.child_token());
            handles.push(Arc::new(job).start());
        }
        if let Some(job) = self.active_resolution {
            let job = job.with_cancellation(self.shutdown.child_token());
            handles.push(Arc::new(job).start());
        }

        info!(jobs = handles.len(), "All background jobs started");
        RunningJobs {
            handles,
            shutdown: self.shutdown,
        }
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancels every job and waits for its loop to exit.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background job ended abnormally");
            }
        }
        info!("Background jobs stopped");
    }
}
