use bell_dns_domain::{DomainError, ProcessedTld, QueryProgress};
use std::sync::Arc;

use crate::ports::{QueryProgressRepository, ZoneRepository};

#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub cursor: QueryProgress,
    pub processed_tlds: Vec<ProcessedTld>,
}

pub struct GetStatusUseCase {
    zone_repo: Arc<dyn ZoneRepository>,
    progress_repo: Arc<dyn QueryProgressRepository>,
}

impl GetStatusUseCase {
    pub fn new(
        zone_repo: Arc<dyn ZoneRepository>,
        progress_repo: Arc<dyn QueryProgressRepository>,
    ) -> Self {
        Self {
            zone_repo,
            progress_repo,
        }
    }

    pub async fn execute(&self) -> Result<StatusReport, DomainError> {
        let mut processed_tlds = self.zone_repo.processed_tlds().await?;
        processed_tlds.sort_by(|a, b| a.tld.cmp(&b.tld));

        Ok(StatusReport {
            cursor: self.progress_repo.load().await?,
            processed_tlds,
        })
    }
}
