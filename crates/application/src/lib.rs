//! Bell DNS Application Layer
//!
//! Ports (storage, DNS transport, zone archives), shared services and the
//! two batch engines: zone ingestion and active resolution.
pub mod ports;
pub mod services;
pub mod use_cases;
