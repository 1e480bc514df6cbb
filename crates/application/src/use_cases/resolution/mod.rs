mod discover_nameservers;
mod resolve_domains;
mod resolve_records;

pub use discover_nameservers::NameserverResolver;
pub use resolve_domains::{DomainOutcome, ResolutionSummary, ResolveDomainsUseCase};
pub use resolve_records::RecordResolver;
