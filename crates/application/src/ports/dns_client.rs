use async_trait::async_trait;
use bell_dns_domain::{DomainError, RecordType, ResourceRecord};
use std::time::Duration;

/// One-shot DNS exchange against a single server.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Sends one query for `name`/`record_type` to `server` and returns the
    /// answer section.
    ///
    /// `server` is `host:port` or a bare host (port 53). A response without
    /// answers is `Ok(vec![])`; only failures to obtain a response are errors.
    async fn query(
        &self,
        server: &str,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<Vec<ResourceRecord>, DomainError>;
}
