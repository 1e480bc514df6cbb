use chrono::{DateTime, Duration, Utc};

/// Per-TLD ingestion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedTld {
    pub tld: String,
    pub last_processed: DateTime<Utc>,
}

impl ProcessedTld {
    /// True while the TLD was processed less than `window` ago.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now.signed_duration_since(self.last_processed) < window
    }
}

/// Resumable cursor of active resolution (singleton row).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryProgress {
    pub last_domain_id: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}
