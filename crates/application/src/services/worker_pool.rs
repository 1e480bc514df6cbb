use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Outcome of one [`WorkerPool::run`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub dispatched: usize,
    pub panicked: usize,
}

/// Bounded-concurrency task runner shared by both engines.
///
/// At most `max_concurrent` tasks run at once. A panicking task is logged and
/// counted; it never cancels its siblings. `run` returns once every
/// dispatched task has finished.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    name: &'static str,
    max_concurrent: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(name: &'static str, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            name,
            max_concurrent,
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub async fn run<I, F, Fut>(&self, items: I, task: F) -> PoolReport
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = JoinSet::new();
        let mut report = PoolReport::default();

        for item in items {
            // The semaphore is never closed, so acquisition only fails if it
            // were; stop dispatching in that case and drain what is running.
            let permit = match Arc::clone(&self.permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let fut = task(item);
            tasks.spawn(async move {
                let _permit = permit;
                fut.await;
            });
            report.dispatched += 1;

            // Reap finished tasks so the set does not grow with the input.
            while let Some(joined) = tasks.try_join_next() {
                self.record(joined, &mut report);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            self.record(joined, &mut report);
        }

        debug!(
            pool = self.name,
            dispatched = report.dispatched,
            panicked = report.panicked,
            "Worker pool drained"
        );
        report
    }

    fn record(&self, joined: Result<(), tokio::task::JoinError>, report: &mut PoolReport) {
        if let Err(e) = joined {
            report.panicked += 1;
            if e.is_panic() {
                error!(pool = self.name, error = %e, "Worker task panicked; recovered");
            } else {
                error!(pool = self.name, error = %e, "Worker task aborted");
            }
        }
    }
}
