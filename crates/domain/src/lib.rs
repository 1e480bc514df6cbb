//! Bell DNS Domain Layer
pub mod config;
pub mod dns_record;
pub mod domain;
pub mod errors;
pub mod progress;
pub mod validators;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{DnsRecord, RecordData, RecordSource, RecordType, ResourceRecord};
pub use domain::Domain;
pub use errors::DomainError;
pub use progress::{ProcessedTld, QueryProgress};
pub use zone::{ZoneBatch, ZoneFile, ZoneRecord};
