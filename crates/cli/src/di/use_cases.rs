use super::Repositories;
use bell_dns_application::ports::{DnsClient, ZoneArchive};
use bell_dns_application::services::{build_selector, RetryPolicy};
use bell_dns_application::use_cases::{
    GetRecordsUseCase, GetStatusUseCase, IngestZonesUseCase, NameserverResolver, RecordResolver,
    ResolveDomainsUseCase, ValidateApiKeyUseCase,
};
use bell_dns_domain::Config;
use bell_dns_infrastructure::dns::UdpDnsClient;
use bell_dns_infrastructure::zones::FsZoneArchive;
use std::sync::Arc;
use std::time::Duration;

/// Composition root: every use case wired to SQLite, UDP and the zone directory.
pub struct UseCases {
    pub ingest_zones: Arc<IngestZonesUseCase>,
    pub resolve_domains: Arc<ResolveDomainsUseCase>,
    pub get_records: Arc<GetRecordsUseCase>,
    pub validate_api_key: Arc<ValidateApiKeyUseCase>,
    pub get_status: Arc<GetStatusUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        let archive: Arc<dyn ZoneArchive> = Arc::new(FsZoneArchive::new(
            &config.zones.directory,
            config.zones.file_suffix.as_str(),
        ));
        let client: Arc<dyn DnsClient> = Arc::new(UdpDnsClient::new());

        let query = &config.dns_query;
        let timeout = Duration::from_secs(query.query_timeout_secs);
        let ns_resolver = Arc::new(NameserverResolver::new(
            Arc::clone(&client),
            build_selector(query.selector),
            query.dns_servers.clone(),
            RetryPolicy::from_config(query),
            timeout,
        ));
        let record_resolver = Arc::new(RecordResolver::new(
            client,
            RetryPolicy::from_config(query),
            timeout,
        ));

        Self {
            ingest_zones: Arc::new(IngestZonesUseCase::new(
                archive,
                repos.zones.clone(),
                &config.zones,
            )),
            resolve_domains: Arc::new(ResolveDomainsUseCase::new(
                repos.domains.clone(),
                repos.records.clone(),
                repos.progress.clone(),
                ns_resolver,
                record_resolver,
                query,
            )),
            get_records: Arc::new(GetRecordsUseCase::new(repos.records.clone())),
            validate_api_key: Arc::new(ValidateApiKeyUseCase::new(repos.api_keys.clone())),
            get_status: Arc::new(GetStatusUseCase::new(
                repos.zones.clone(),
                repos.progress.clone(),
            )),
        }
    }
}
