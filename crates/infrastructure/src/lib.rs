//! Bell DNS Infrastructure Layer
//!
//! SQLite storage, the UDP DNS client and the gzip zone archive behind the
//! application ports.
pub mod database;
pub mod dns;
pub mod repositories;
pub mod zones;
