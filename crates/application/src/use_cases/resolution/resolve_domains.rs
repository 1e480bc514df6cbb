use bell_dns_domain::config::DnsQueryConfig;
use bell_dns_domain::validators::{normalize_name, validate_domain_name};
use bell_dns_domain::{Domain, DomainError, RecordType};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{NameserverResolver, RecordResolver};
use crate::ports::{DomainRepository, QueryProgressRepository, RecordRepository};
use crate::services::WorkerPool;

/// What resolving one domain produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainOutcome {
    pub domain_id: i64,
    /// Nameservers the typed queries went to.
    pub nameservers: Vec<String>,
    pub discovered: bool,
    pub records_stored: u64,
    /// Typed queries were not attempted (no usable nameserver).
    pub skipped: bool,
}

/// Totals of one active resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub pages: usize,
    pub domains: usize,
    pub skipped: usize,
    pub failed: usize,
    pub records_stored: u64,
    /// In-memory cursor after the last completed page.
    pub cursor: Option<i64>,
}

#[derive(Default)]
struct Counters {
    domains: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
    records_stored: AtomicU64,
}

/// Per-domain work shared by every pool task.
struct DomainWorker {
    record_repo: Arc<dyn RecordRepository>,
    progress_repo: Arc<dyn QueryProgressRepository>,
    ns_resolver: Arc<NameserverResolver>,
    record_resolver: Arc<RecordResolver>,
    type_delay: Duration,
}

impl DomainWorker {
    async fn resolve(&self, domain: &Domain) -> Result<DomainOutcome, DomainError> {
        let mut outcome = DomainOutcome {
            domain_id: domain.id,
            ..Default::default()
        };

        outcome.nameservers = if domain.has_nameservers() {
            domain.nameservers.clone()
        } else {
            outcome.discovered = true;
            match self.ns_resolver.discover(&domain.name).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(domain = %domain.name, error = %e, "NS discovery abandoned for this cycle");
                    outcome.skipped = true;
                    return Ok(outcome);
                }
            }
        };

        if outcome.nameservers.is_empty() {
            debug!(domain = %domain.name, "No nameservers; skipping typed queries");
            outcome.skipped = true;
            return Ok(outcome);
        }

        let mut records = Vec::new();
        for (i, record_type) in RecordType::RESOLUTION_ORDER.iter().enumerate() {
            if i > 0 && !self.type_delay.is_zero() {
                tokio::time::sleep(self.type_delay).await;
            }
            let found = self
                .record_resolver
                .resolve(domain, *record_type, &outcome.nameservers)
                .await;
            debug!(domain = %domain.name, %record_type, found = found.len(), "Record type resolved");
            records.extend(found);
        }

        if !records.is_empty() {
            outcome.records_stored = self.record_repo.store_records(domain.id, &records).await?;
            info!(
                domain = %domain.name,
                domain_id = domain.id,
                stored = outcome.records_stored,
                "Records stored"
            );
        }
        Ok(outcome)
    }

    /// Resolves `domain` and then moves the persisted cursor to its id.
    async fn process(&self, domain: Domain, counters: &Counters) {
        match self.resolve(&domain).await {
            Ok(outcome) => {
                counters.domains.fetch_add(1, Ordering::Relaxed);
                counters
                    .records_stored
                    .fetch_add(outcome.records_stored, Ordering::Relaxed);
                if outcome.skipped {
                    counters.skipped.fetch_add(1, Ordering::Relaxed);
                }
            }
            Err(e) => {
                error!(domain = %domain.name, domain_id = domain.id, error = %e, "Domain resolution failed");
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        match self.progress_repo.advance(domain.id).await {
            Ok(persisted) => debug!(domain_id = domain.id, cursor = persisted, "Cursor advanced"),
            Err(e) => error!(domain_id = domain.id, error = %e, "Failed to persist cursor"),
        }
    }
}

/// Active resolution engine.
///
/// Walks the stale-domain backlog page by page in id order, starting after
/// the persisted cursor, resolving each page through the worker pool.
pub struct ResolveDomainsUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    progress_repo: Arc<dyn QueryProgressRepository>,
    worker: Arc<DomainWorker>,
    pool: WorkerPool,
    page_size: usize,
    stale_after: chrono::Duration,
}

impl ResolveDomainsUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        record_repo: Arc<dyn RecordRepository>,
        progress_repo: Arc<dyn QueryProgressRepository>,
        ns_resolver: Arc<NameserverResolver>,
        record_resolver: Arc<RecordResolver>,
        config: &DnsQueryConfig,
    ) -> Self {
        let hours = i64::try_from(config.stale_after_hours).unwrap_or(i64::MAX);
        let worker = DomainWorker {
            record_repo,
            progress_repo: Arc::clone(&progress_repo),
            ns_resolver,
            record_resolver,
            type_delay: Duration::from_secs(config.type_delay_secs),
        };

        Self {
            domain_repo,
            progress_repo,
            worker: Arc::new(worker),
            pool: WorkerPool::new("active-resolution", config.max_concurrent),
            page_size: config.batch_size.max(1),
            stale_after: chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Runs until a page comes back empty.
    ///
    /// Per-domain failures are logged and counted; storage errors while
    /// loading the cursor or a page end the run.
    pub async fn execute(&self) -> Result<ResolutionSummary, DomainError> {
        let mut cursor = self.progress_repo.load().await?.last_domain_id;
        let stale_before = Utc::now()
            .checked_sub_signed(self.stale_after)
            .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
        let counters = Arc::new(Counters::default());
        let mut summary = ResolutionSummary::default();

        info!(cursor = ?cursor, page_size = self.page_size, "Starting active resolution");

        loop {
            let page = self
                .domain_repo
                .fetch_stale_page(cursor, stale_before, self.page_size)
                .await?;
            let Some(page_max) = page.iter().map(|d| d.id).max() else {
                break;
            };
            summary.pages += 1;
            debug!(page = summary.pages, domains = page.len(), page_max, "Dispatching page");

            let report = self
                .pool
                .run(page, |domain| {
                    let worker = Arc::clone(&self.worker);
                    let counters = Arc::clone(&counters);
                    async move { worker.process(domain, &counters).await }
                })
                .await;
            summary.failed += report.panicked;

            cursor = cursor.max(Some(page_max));
        }

        summary.domains = counters.domains.load(Ordering::Relaxed);
        summary.skipped = counters.skipped.load(Ordering::Relaxed);
        summary.failed += counters.failed.load(Ordering::Relaxed);
        summary.records_stored = counters.records_stored.load(Ordering::Relaxed);
        summary.cursor = cursor;

        info!(
            pages = summary.pages,
            domains = summary.domains,
            skipped = summary.skipped,
            failed = summary.failed,
            records = summary.records_stored,
            cursor = ?summary.cursor,
            "Active resolution finished"
        );
        Ok(summary)
    }

    /// Resolves one named domain on demand, discovering its nameservers when
    /// none are stored. The persisted cursor is left untouched.
    pub async fn resolve_domain(&self, name: &str) -> Result<DomainOutcome, DomainError> {
        let name = normalize_name(name);
        validate_domain_name(&name)?;

        let domain = self
            .domain_repo
            .find_by_name(&name)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("domain {name}")))?;

        self.worker.resolve(&domain).await
    }
}
