use async_trait::async_trait;
use bell_dns_domain::{DomainError, QueryProgress};

/// Persisted cursor of active resolution.
#[async_trait]
pub trait QueryProgressRepository: Send + Sync {
    async fn load(&self) -> Result<QueryProgress, DomainError>;

    /// Moves the cursor to `domain_id` unless it is already further.
    ///
    /// Must be a single atomic max-update so concurrent workers never move it
    /// backwards. Returns the value persisted afterwards.
    async fn advance(&self, domain_id: i64) -> Result<i64, DomainError>;
}
