pub mod active_resolution;
pub mod runner;
pub mod zone_ingestion;

pub use active_resolution::ActiveResolutionJob;
pub use runner::{JobRunner, RunningJobs};
pub use zone_ingestion::ZoneIngestionJob;
