//! Configuration module for Bell DNS
//!
//! Structures are organised by concern:
//! - `root`: Main configuration and CLI overrides
//! - `database`: Store connection parameters
//! - `zones`: Zone ingestion settings
//! - `dns_query`: Active resolution settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod database;
pub mod dns_query;
pub mod errors;
pub mod logging;
pub mod root;
pub mod zones;

pub use database::DatabaseConfig;
pub use dns_query::{DnsQueryConfig, SelectorKind};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use zones::ZonesConfig;
