mod ingest_file;
mod ingest_zones;

pub use ingest_file::{FileOutcome, ZoneFileIngestor};
pub use ingest_zones::{IngestZonesUseCase, IngestionSummary};
