#![allow(dead_code)]

use async_trait::async_trait;
use bell_dns_application::ports::{
    ApiKeyRepository, BatchOutcome, DomainRepository, QueryProgressRepository, RecordRepository,
    ZoneRepository,
};
use bell_dns_domain::{
    DnsRecord, Domain, DomainError, ProcessedTld, QueryProgress, RecordType, ZoneBatch,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// In-memory store implementing every storage port
// ============================================================================

#[derive(Default)]
struct StoreState {
    domains: Vec<Domain>,
    records: Vec<DnsRecord>,
    processed: HashMap<String, ProcessedTld>,
    cursor: Option<i64>,
    cursor_updated_at: Option<DateTime<Utc>>,
    advanced_ids: Vec<i64>,
    api_keys: HashMap<String, bool>,
    next_id: i64,
}

impl StoreState {
    fn insert_record(&mut self, record: DnsRecord) -> bool {
        let duplicate = self.records.iter().any(|r| {
            r.domain_id == record.domain_id
                && r.record_type == record.record_type
                && r.record_data == record.record_data
        });
        if duplicate {
            return false;
        }
        self.records.push(DnsRecord {
            last_updated: Some(Utc::now()),
            ..record
        });
        true
    }
}

#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<RwLock<StoreState>>,
    fail_batch_at: Arc<RwLock<Option<u64>>>,
    fail_store_records: Arc<RwLock<bool>>,
    batch_calls: Arc<AtomicU64>,
    page_calls: Arc<AtomicU64>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `n`-th `store_batch` call (1-based) fail without writing.
    pub async fn fail_batch_at(&self, n: u64) {
        *self.fail_batch_at.write().await = Some(n);
    }

    pub async fn set_fail_store_records(&self, fail: bool) {
        *self.fail_store_records.write().await = fail;
    }

    pub async fn seed_domain(
        &self,
        name: &str,
        tld: &str,
        nameservers: &[&str],
        last_updated: Option<DateTime<Utc>>,
    ) -> i64 {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        state.domains.push(Domain {
            id,
            name: name.to_string(),
            tld: tld.to_string(),
            nameservers: nameservers.iter().map(|s| s.to_string()).collect(),
            last_updated,
        });
        id
    }

    pub async fn seed_processed(&self, tld: &str, last_processed: DateTime<Utc>) {
        self.state.write().await.processed.insert(
            tld.to_string(),
            ProcessedTld {
                tld: tld.to_string(),
                last_processed,
            },
        );
    }

    pub async fn seed_cursor(&self, domain_id: i64) {
        self.state.write().await.cursor = Some(domain_id);
    }

    pub async fn seed_api_key(&self, key: &str, active: bool) {
        self.state
            .write()
            .await
            .api_keys
            .insert(key.to_string(), active);
    }

    pub async fn domains(&self) -> Vec<Domain> {
        self.state.read().await.domains.clone()
    }

    pub async fn domain(&self, name: &str) -> Option<Domain> {
        self.state
            .read()
            .await
            .domains
            .iter()
            .find(|d| d.name == name)
            .cloned()
    }

    pub async fn records(&self) -> Vec<DnsRecord> {
        self.state.read().await.records.clone()
    }

    pub async fn records_for(&self, domain_id: i64) -> Vec<DnsRecord> {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|r| r.domain_id == domain_id)
            .cloned()
            .collect()
    }

    pub async fn processed(&self, tld: &str) -> Option<ProcessedTld> {
        self.state.read().await.processed.get(tld).cloned()
    }

    pub async fn cursor(&self) -> Option<i64> {
        self.state.read().await.cursor
    }

    /// Ids passed to `advance`, in call order.
    pub async fn advanced_ids(&self) -> Vec<i64> {
        self.state.read().await.advanced_ids.clone()
    }

    pub fn batch_calls(&self) -> u64 {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> u64 {
        self.page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneRepository for MockStore {
    async fn processed_tlds(&self) -> Result<Vec<ProcessedTld>, DomainError> {
        Ok(self.state.read().await.processed.values().cloned().collect())
    }

    async fn store_batch(&self, tld: &str, batch: &ZoneBatch) -> Result<BatchOutcome, DomainError> {
        let call = self.batch_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_batch_at.read().await == Some(call) {
            return Err(DomainError::DatabaseError("mock batch failure".to_string()));
        }

        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut ids = HashMap::new();

        for name in batch.domains() {
            let nameservers = batch.nameservers_for(name).to_vec();
            let existing = state
                .domains
                .iter()
                .position(|d| d.name == name && d.tld == tld);
            let id = match existing {
                Some(pos) => {
                    let domain = &mut state.domains[pos];
                    if !nameservers.is_empty() {
                        domain.nameservers = nameservers;
                    }
                    domain.last_updated = Some(now);
                    domain.id
                }
                None => {
                    state.next_id += 1;
                    let id = state.next_id;
                    state.domains.push(Domain {
                        id,
                        name: name.to_string(),
                        tld: tld.to_string(),
                        nameservers,
                        last_updated: Some(now),
                    });
                    id
                }
            };
            ids.insert(name.to_string(), id);
        }

        let mut inserted = 0;
        for record in &batch.records {
            let domain_id = ids[record.domain_name()];
            let row = DnsRecord::new(
                domain_id,
                record.record_type(),
                record.record_data(),
                record.ttl(),
                record.source,
            );
            if state.insert_record(row) {
                inserted += 1;
            }
        }

        Ok(BatchOutcome {
            domains: ids.len(),
            records_inserted: inserted,
        })
    }

    async fn mark_processed(&self, tld: &str) -> Result<ProcessedTld, DomainError> {
        let processed = ProcessedTld {
            tld: tld.to_string(),
            last_processed: Utc::now(),
        };
        self.state
            .write()
            .await
            .processed
            .insert(tld.to_string(), processed.clone());
        Ok(processed)
    }
}

#[async_trait]
impl DomainRepository for MockStore {
    async fn fetch_stale_page(
        &self,
        after_id: Option<i64>,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Domain>, DomainError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        let mut page: Vec<Domain> = state
            .domains
            .iter()
            .filter(|d| d.has_nameservers())
            .filter(|d| d.last_updated.map_or(true, |t| t < stale_before))
            .filter(|d| after_id.map_or(true, |after| d.id > after))
            .cloned()
            .collect();
        page.sort_by_key(|d| d.id);
        page.truncate(limit);
        Ok(page)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>, DomainError> {
        Ok(self.domain(name).await)
    }
}

#[async_trait]
impl RecordRepository for MockStore {
    async fn store_records(&self, domain_id: i64, records: &[DnsRecord]) -> Result<u64, DomainError> {
        if *self.fail_store_records.read().await {
            return Err(DomainError::DatabaseError("mock record failure".to_string()));
        }
        let mut state = self.state.write().await;
        let mut inserted = 0;
        for record in records {
            if state.insert_record(DnsRecord {
                domain_id,
                ..record.clone()
            }) {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn find_by_domain(
        &self,
        domain_name: &str,
        record_types: &[RecordType],
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let state = self.state.read().await;
        let ids: Vec<i64> = state
            .domains
            .iter()
            .filter(|d| d.name == domain_name)
            .map(|d| d.id)
            .collect();
        Ok(state
            .records
            .iter()
            .filter(|r| ids.contains(&r.domain_id))
            .filter(|r| record_types.is_empty() || record_types.contains(&r.record_type))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QueryProgressRepository for MockStore {
    async fn load(&self) -> Result<QueryProgress, DomainError> {
        let state = self.state.read().await;
        Ok(QueryProgress {
            last_domain_id: state.cursor,
            updated_at: state.cursor_updated_at,
        })
    }

    async fn advance(&self, domain_id: i64) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;
        state.advanced_ids.push(domain_id);
        let next = state.cursor.map_or(domain_id, |c| c.max(domain_id));
        state.cursor = Some(next);
        state.cursor_updated_at = Some(Utc::now());
        Ok(next)
    }
}

#[async_trait]
impl ApiKeyRepository for MockStore {
    async fn is_active(&self, api_key: &str) -> Result<Option<bool>, DomainError> {
        Ok(self.state.read().await.api_keys.get(api_key).copied())
    }
}
