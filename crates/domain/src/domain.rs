use chrono::{DateTime, Utc};

/// A registered domain tracked by the store.
///
/// Unique on `(name, tld)`. Written by zone ingestion, read by active resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: i64,
    pub name: String,
    pub tld: String,
    /// Delegated nameserver hostnames, in zone order, without trailing dots
    pub nameservers: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Domain {
    pub fn has_nameservers(&self) -> bool {
        !self.nameservers.is_empty()
    }
}
