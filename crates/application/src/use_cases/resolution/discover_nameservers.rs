use bell_dns_domain::{DomainError, RecordType};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::ports::DnsClient;
use crate::services::{NameserverSelector, RetryPolicy};

/// Finds the authoritative nameservers of a domain whose list is unknown.
pub struct NameserverResolver {
    client: Arc<dyn DnsClient>,
    selector: Arc<dyn NameserverSelector>,
    resolver_pool: Vec<String>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl NameserverResolver {
    pub fn new(
        client: Arc<dyn DnsClient>,
        selector: Arc<dyn NameserverSelector>,
        resolver_pool: Vec<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            selector,
            resolver_pool,
            retry,
            timeout,
        }
    }

    /// Issues one NS query against a resolver picked from the pool, retrying
    /// transport failures. The returned list may be empty.
    #[instrument(skip(self))]
    pub async fn discover(&self, domain: &str) -> Result<Vec<String>, DomainError> {
        let server = self
            .selector
            .select(&self.resolver_pool)
            .ok_or_else(|| DomainError::NotFound("resolver pool is empty".to_string()))?;

        let answers = self
            .retry
            .run(|| self.client.query(server, domain, RecordType::NS, self.timeout))
            .await?;

        let mut seen = FxHashSet::default();
        let nameservers: Vec<String> = answers
            .iter()
            .filter_map(|rr| rr.data.nameserver())
            .map(str::to_ascii_lowercase)
            .filter(|host| seen.insert(host.clone()))
            .collect();

        debug!(
            server,
            found = nameservers.len(),
            "Nameserver discovery finished"
        );
        Ok(nameservers)
    }
}
