pub mod api_key_repository;
pub mod domain_repository;
pub mod query_progress_repository;
pub mod record_repository;
pub mod zone_repository;

pub use api_key_repository::SqliteApiKeyRepository;
pub use domain_repository::SqliteDomainRepository;
pub use query_progress_repository::SqliteQueryProgressRepository;
pub use record_repository::SqliteRecordRepository;
pub use zone_repository::SqliteZoneRepository;
