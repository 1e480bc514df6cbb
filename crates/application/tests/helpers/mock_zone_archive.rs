#![allow(dead_code)]

use async_trait::async_trait;
use bell_dns_application::ports::{ZoneArchive, ZoneReader};
use bell_dns_domain::{DomainError, ZoneFile};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

// ============================================================================
// In-memory ZoneArchive
// ============================================================================

/// Zone dumps held as plain text, keyed by TLD in insertion order.
#[derive(Clone, Default)]
pub struct MockZoneArchive {
    zones: Arc<RwLock<Vec<(String, String)>>>,
    open_calls: Arc<AtomicU64>,
}

impl MockZoneArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, tld: &str, content: &str) -> Self {
        self.add_zone(tld, content);
        self
    }

    pub fn add_zone(&self, tld: &str, content: &str) {
        let mut zones = self.zones.write().unwrap();
        zones.retain(|(t, _)| t != tld);
        zones.push((tld.to_string(), content.to_string()));
    }

    pub fn open_calls(&self) -> u64 {
        self.open_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneArchive for MockZoneArchive {
    async fn list(&self) -> Result<Vec<ZoneFile>, DomainError> {
        Ok(self
            .zones
            .read()
            .unwrap()
            .iter()
            .map(|(tld, _)| ZoneFile {
                tld: tld.clone(),
                path: PathBuf::from(format!("{tld}.txt.gz")),
            })
            .collect())
    }

    fn open(&self, file: &ZoneFile) -> Result<ZoneReader, DomainError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        let zones = self.zones.read().unwrap();
        let content = zones
            .iter()
            .find(|(tld, _)| *tld == file.tld)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| DomainError::NotFound(file.path.display().to_string()))?;
        Ok(Box::new(Cursor::new(content.into_bytes())))
    }
}
