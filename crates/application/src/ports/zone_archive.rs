use async_trait::async_trait;
use bell_dns_domain::{DomainError, ZoneFile};
use std::io::BufRead;

pub type ZoneReader = Box<dyn BufRead + Send>;

/// Source of TLD zone dumps.
#[async_trait]
pub trait ZoneArchive: Send + Sync {
    /// Eligible zone files, one per TLD.
    async fn list(&self) -> Result<Vec<ZoneFile>, DomainError>;

    /// Opens a decompressed reader over `file`.
    ///
    /// Blocking; callers run it off the async executor.
    fn open(&self, file: &ZoneFile) -> Result<ZoneReader, DomainError>;
}
