pub mod api_key_repository;
pub mod dns_client;
pub mod domain_repository;
pub mod query_progress_repository;
pub mod record_repository;
pub mod zone_archive;
pub mod zone_repository;

pub use api_key_repository::ApiKeyRepository;
pub use dns_client::DnsClient;
pub use domain_repository::DomainRepository;
pub use query_progress_repository::QueryProgressRepository;
pub use record_repository::RecordRepository;
pub use zone_archive::{ZoneArchive, ZoneReader};
pub use zone_repository::{BatchOutcome, ZoneRepository};
