use async_trait::async_trait;
use bell_dns_domain::{Domain, DomainError};
use chrono::{DateTime, Utc};

#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Next page of the resolution backlog.
    ///
    /// Domains with a non-empty nameserver list whose `last_updated` is NULL
    /// or older than `stale_before`, with `id > after_id`, ordered by id.
    async fn fetch_stale_page(
        &self,
        after_id: Option<i64>,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Domain>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Domain>, DomainError>;
}
