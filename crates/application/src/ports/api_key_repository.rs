use async_trait::async_trait;
use bell_dns_domain::DomainError;

#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// `Some(is_active)` for a known key, `None` otherwise.
    async fn is_active(&self, api_key: &str) -> Result<Option<bool>, DomainError>;
}
