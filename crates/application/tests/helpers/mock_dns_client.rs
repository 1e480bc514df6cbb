#![allow(dead_code)]

use async_trait::async_trait;
use bell_dns_application::ports::DnsClient;
use bell_dns_domain::{DomainError, RecordData, RecordType, ResourceRecord};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

type Key = (String, String, RecordType);

/// One recorded `query` call.
#[derive(Debug, Clone)]
pub struct QueryCall {
    pub server: String,
    pub name: String,
    pub record_type: RecordType,
    pub at: Instant,
}

// ============================================================================
// Scripted DnsClient
// ============================================================================

/// Unscripted queries answer with no records.
#[derive(Clone, Default)]
pub struct MockDnsClient {
    answers: Arc<RwLock<HashMap<Key, Vec<ResourceRecord>>>>,
    transient_failures: Arc<RwLock<HashMap<Key, u32>>>,
    down: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<QueryCall>>>,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_answer(
        &self,
        server: &str,
        name: &str,
        record_type: RecordType,
        answers: Vec<ResourceRecord>,
    ) {
        self.answers
            .write()
            .await
            .insert(key(server, name, record_type), answers);
    }

    /// The next `times` queries for this key time out.
    pub async fn fail_times(&self, server: &str, name: &str, record_type: RecordType, times: u32) {
        self.transient_failures
            .write()
            .await
            .insert(key(server, name, record_type), times);
    }

    /// Every query to `server` times out.
    pub async fn set_down(&self, server: &str) {
        self.down.write().await.insert(server.to_string());
    }

    pub async fn calls(&self) -> Vec<QueryCall> {
        self.calls.read().await.clone()
    }

    pub async fn calls_for(&self, name: &str) -> Vec<QueryCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.name == name)
            .cloned()
            .collect()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

fn key(server: &str, name: &str, record_type: RecordType) -> Key {
    (server.to_string(), name.to_string(), record_type)
}

#[async_trait]
impl DnsClient for MockDnsClient {
    async fn query(
        &self,
        server: &str,
        name: &str,
        record_type: RecordType,
        _timeout: Duration,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.calls.write().await.push(QueryCall {
            server: server.to_string(),
            name: name.to_string(),
            record_type,
            at: Instant::now(),
        });

        if self.down.read().await.contains(server) {
            return Err(DomainError::QueryTimeout {
                server: server.to_string(),
            });
        }

        let k = key(server, name, record_type);
        if let Some(left) = self.transient_failures.write().await.get_mut(&k) {
            if *left > 0 {
                *left -= 1;
                return Err(DomainError::QueryTimeout {
                    server: server.to_string(),
                });
            }
        }

        Ok(self.answers.read().await.get(&k).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Answer builders
// ============================================================================

pub fn a_record(owner: &str, addr: &str) -> ResourceRecord {
    ResourceRecord::new(owner, 300, RecordData::A(addr.parse().unwrap()))
}

pub fn ns_record(owner: &str, host: &str) -> ResourceRecord {
    ResourceRecord::new(owner, 86400, RecordData::Ns(host.to_string()))
}

pub fn mx_record(owner: &str, preference: u16, exchange: &str) -> ResourceRecord {
    ResourceRecord::new(
        owner,
        3600,
        RecordData::Mx {
            preference,
            exchange: exchange.to_string(),
        },
    )
}
