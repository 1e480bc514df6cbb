use crate::dns_record::{RecordSource, RecordType, ResourceRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;
use std::sync::Arc;

/// One compressed zone dump on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFile {
    pub tld: String,
    pub path: PathBuf,
}

/// A classified record read from a TLD zone dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub record: ResourceRecord,
    pub tld: Arc<str>,
    pub source: RecordSource,
}

impl ZoneRecord {
    pub fn new(record: ResourceRecord, tld: Arc<str>) -> Self {
        Self {
            record,
            tld,
            source: RecordSource::BulkIngest,
        }
    }

    pub fn domain_name(&self) -> &str {
        &self.record.owner
    }

    pub fn record_type(&self) -> RecordType {
        self.record.record_type()
    }

    pub fn ttl(&self) -> u32 {
        self.record.ttl
    }

    /// Verbatim textual form persisted as `record_data`.
    pub fn record_data(&self) -> String {
        self.record.to_presentation()
    }
}

/// Records delivered together, plus the NS targets seen in them per owner.
#[derive(Debug, Clone, Default)]
pub struct ZoneBatch {
    pub records: Vec<ZoneRecord>,
    pub nameservers: FxHashMap<String, Vec<String>>,
}

impl ZoneBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            nameservers: FxHashMap::default(),
        }
    }

    /// Appends a record, accumulating NS targets in document order.
    pub fn push(&mut self, record: ZoneRecord) {
        if let Some(target) = record.record.data.nameserver() {
            self.nameservers
                .entry(record.domain_name().to_string())
                .or_default()
                .push(target.to_string());
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct owner names in first-seen order.
    pub fn domains(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.records
            .iter()
            .map(|r| r.domain_name())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn nameservers_for(&self, domain: &str) -> &[String] {
        self.nameservers
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
