use async_trait::async_trait;
use bell_dns_application::ports::{ZoneArchive, ZoneReader};
use bell_dns_domain::{DomainError, ZoneFile};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Read buffer for decompressed zone text.
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Directory of gzip zone dumps named `<tld><suffix>`.
pub struct FsZoneArchive {
    directory: PathBuf,
    suffix: String,
}

impl FsZoneArchive {
    pub fn new(directory: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            suffix: suffix.into(),
        }
    }

    fn tld_of(&self, file_name: &str) -> Option<String> {
        file_name
            .strip_suffix(self.suffix.as_str())
            .map(|tld| tld.trim_end_matches('.').to_ascii_lowercase())
    }
}

#[async_trait]
impl ZoneArchive for FsZoneArchive {
    #[instrument(skip(self), fields(directory = %self.directory.display()))]
    async fn list(&self) -> Result<Vec<ZoneFile>, DomainError> {
        let mut entries = tokio::fs::read_dir(&self.directory).await.map_err(|e| {
            DomainError::IoError(format!(
                "cannot read zone directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(tld) = self.tld_of(file_name) else {
                continue;
            };
            if tld.is_empty() {
                warn!(file = file_name, "Zone file without a TLD prefix, skipping");
                continue;
            }

            files.push(ZoneFile {
                tld,
                path: entry.path(),
            });
        }

        files.sort_by(|a, b| a.tld.cmp(&b.tld));
        debug!(count = files.len(), "Zone files discovered");
        Ok(files)
    }

    fn open(&self, file: &ZoneFile) -> Result<ZoneReader, DomainError> {
        let handle = File::open(&file.path).map_err(|e| {
            DomainError::IoError(format!("cannot open {}: {}", file.path.display(), e))
        })?;

        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(handle),
        )))
    }
}
