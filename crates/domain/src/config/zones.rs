use serde::{Deserialize, Serialize};

/// Zone ingestion settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZonesConfig {
    /// Directory holding one compressed dump per TLD
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Hours before an ingested TLD may be processed again
    #[serde(default = "default_reprocess_threshold_hours")]
    pub reprocess_threshold_hours: u64,

    /// Maximum number of zone files processed concurrently
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Records per storage transaction
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// File name suffix identifying a zone dump (`<tld><suffix>`)
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            reprocess_threshold_hours: default_reprocess_threshold_hours(),
            max_concurrent: default_max_concurrent(),
            batch_size: default_batch_size(),
            file_suffix: default_file_suffix(),
        }
    }
}

fn default_directory() -> String {
    "./zones".to_string()
}

fn default_reprocess_threshold_hours() -> u64 {
    24
}

fn default_max_concurrent() -> usize {
    4
}

fn default_batch_size() -> usize {
    1000
}

fn default_file_suffix() -> String {
    ".txt.gz".to_string()
}
