use bell_dns_domain::validators::{normalize_name, validate_domain_name};
use bell_dns_domain::{DnsRecord, DomainError, RecordType};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::RecordRepository;

/// Read path for the serving layer: stored records of one domain.
pub struct GetRecordsUseCase {
    record_repo: Arc<dyn RecordRepository>,
}

impl GetRecordsUseCase {
    pub fn new(record_repo: Arc<dyn RecordRepository>) -> Self {
        Self { record_repo }
    }

    /// An empty `record_types` returns every type.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain_name: &str,
        record_types: &[RecordType],
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let name = normalize_name(domain_name);
        validate_domain_name(&name)?;
        self.record_repo.find_by_domain(&name, record_types).await
    }
}
