use async_trait::async_trait;
use bell_dns_domain::{DnsRecord, DomainError, RecordType};

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Inserts records of one domain atomically, skipping duplicates of
    /// `(domain_id, record_type, record_data)`. Returns rows inserted.
    async fn store_records(&self, domain_id: i64, records: &[DnsRecord]) -> Result<u64, DomainError>;

    /// Records of `domain_name`, restricted to `record_types` unless empty.
    async fn find_by_domain(
        &self,
        domain_name: &str,
        record_types: &[RecordType],
    ) -> Result<Vec<DnsRecord>, DomainError>;
}
