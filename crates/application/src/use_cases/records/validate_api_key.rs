use bell_dns_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::ApiKeyRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Valid,
    Inactive,
    Unknown,
}

pub struct ValidateApiKeyUseCase {
    api_key_repo: Arc<dyn ApiKeyRepository>,
}

impl ValidateApiKeyUseCase {
    pub fn new(api_key_repo: Arc<dyn ApiKeyRepository>) -> Self {
        Self { api_key_repo }
    }

    #[instrument(skip_all)]
    pub async fn execute(&self, api_key: &str) -> Result<ApiKeyStatus, DomainError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Ok(ApiKeyStatus::Unknown);
        }

        let status = match self.api_key_repo.is_active(api_key).await? {
            Some(true) => ApiKeyStatus::Valid,
            Some(false) => ApiKeyStatus::Inactive,
            None => ApiKeyStatus::Unknown,
        };
        debug!(?status, "API key checked");
        Ok(status)
    }
}
