use super::{RecordSource, RecordType, ResourceRecord};
use chrono::{DateTime, Utc};

/// A record row as stored in `dns_records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub domain_id: i64,
    pub record_type: RecordType,
    /// Canonical presentation line of the record
    pub record_data: String,
    pub ttl: u32,
    pub source: RecordSource,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DnsRecord {
    pub fn new(
        domain_id: i64,
        record_type: RecordType,
        record_data: String,
        ttl: u32,
        source: RecordSource,
    ) -> Self {
        Self {
            domain_id,
            record_type,
            record_data,
            ttl,
            source,
            last_updated: None,
        }
    }

    /// Record discovered by a live query.
    ///
    /// `record_type` is the queried type, which may differ from the answer's
    /// own type (a CNAME answering an A query, for instance).
    pub fn from_answer(domain_id: i64, record_type: RecordType, answer: &ResourceRecord) -> Self {
        Self::new(
            domain_id,
            record_type,
            answer.to_presentation(),
            answer.ttl(),
            RecordSource::LiveQuery,
        )
    }
}
