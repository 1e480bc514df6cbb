use std::fmt;

/// Where a stored record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSource {
    /// Bulk ingestion of a TLD zone dump
    BulkIngest,
    /// Live query against a delegated nameserver
    LiveQuery,
}

impl RecordSource {
    /// Value persisted in `dns_records.source`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::BulkIngest => "CZDS",
            RecordSource::LiveQuery => "QUERY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CZDS" => Some(RecordSource::BulkIngest),
            "QUERY" => Some(RecordSource::LiveQuery),
            _ => None,
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
