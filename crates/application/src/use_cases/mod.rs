pub mod ingestion;
pub mod records;
pub mod resolution;
pub mod status;

pub use ingestion::{FileOutcome, IngestZonesUseCase, IngestionSummary, ZoneFileIngestor};
pub use records::{ApiKeyStatus, GetRecordsUseCase, ValidateApiKeyUseCase};
pub use resolution::{
    DomainOutcome, NameserverResolver, RecordResolver, ResolutionSummary, ResolveDomainsUseCase,
};
pub use status::{GetStatusUseCase, StatusReport};
