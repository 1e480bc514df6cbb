use super::ScriptedDnsClient;
use bell_dns_application::services::{build_selector, RetryPolicy};
use bell_dns_application::use_cases::{
    GetRecordsUseCase, GetStatusUseCase, IngestZonesUseCase, NameserverResolver, RecordResolver,
    ResolveDomainsUseCase,
};
use bell_dns_domain::config::{DnsQueryConfig, SelectorKind, ZonesConfig};
use bell_dns_infrastructure::database::create_memory_pool;
use bell_dns_infrastructure::repositories::{
    SqliteDomainRepository, SqliteQueryProgressRepository, SqliteRecordRepository,
    SqliteZoneRepository,
};
use bell_dns_infrastructure::zones::FsZoneArchive;
use flate2::write::GzEncoder;
use flate2::Compression;
use sqlx::SqlitePool;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const RESOLVER: &str = "192.0.2.53:53";

/// No pacing or backoff sleeps, and every ingested domain is immediately stale.
pub fn flow_query_config() -> DnsQueryConfig {
    DnsQueryConfig {
        max_concurrent: 4,
        batch_size: 10,
        dns_servers: vec![RESOLVER.to_string()],
        max_attempts: 2,
        retry_base_delay_ms: 1,
        retry_max_delay_ms: 5,
        retry_jitter: 0.0,
        type_delay_secs: 0,
        stale_after_hours: 0,
        selector: SelectorKind::RoundRobin,
        ..DnsQueryConfig::default()
    }
}

/// Real SQLite and a real gzip zone directory; only DNS is scripted.
pub struct Harness {
    pub pool: SqlitePool,
    pub zone_dir: TempDir,
    pub client: Arc<ScriptedDnsClient>,
    pub zones_config: ZonesConfig,
    pub query_config: DnsQueryConfig,
}

impl Harness {
    pub async fn new() -> Self {
        Self {
            pool: create_memory_pool().await.unwrap(),
            zone_dir: TempDir::new().unwrap(),
            client: Arc::new(ScriptedDnsClient::new()),
            zones_config: ZonesConfig {
                batch_size: 2,
                ..ZonesConfig::default()
            },
            query_config: flow_query_config(),
        }
    }

    pub fn write_zone(&self, tld: &str, text: &str) {
        let path = self.zone_dir.path().join(format!("{tld}.txt.gz"));
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    pub fn ingest_use_case(&self) -> Arc<IngestZonesUseCase> {
        Arc::new(IngestZonesUseCase::new(
            Arc::new(FsZoneArchive::new(
                self.zone_dir.path(),
                self.zones_config.file_suffix.as_str(),
            )),
            Arc::new(SqliteZoneRepository::new(self.pool.clone())),
            &self.zones_config,
        ))
    }

    pub fn resolve_use_case(&self) -> Arc<ResolveDomainsUseCase> {
        let config = &self.query_config;
        let timeout = Duration::from_secs(config.query_timeout_secs);
        let ns_resolver = Arc::new(NameserverResolver::new(
            self.client.clone(),
            build_selector(config.selector),
            config.dns_servers.clone(),
            RetryPolicy::from_config(config),
            timeout,
        ));
        let record_resolver = Arc::new(RecordResolver::new(
            self.client.clone(),
            RetryPolicy::from_config(config),
            timeout,
        ));

        Arc::new(ResolveDomainsUseCase::new(
            Arc::new(SqliteDomainRepository::new(self.pool.clone())),
            Arc::new(SqliteRecordRepository::new(self.pool.clone())),
            Arc::new(SqliteQueryProgressRepository::new(self.pool.clone())),
            ns_resolver,
            record_resolver,
            config,
        ))
    }

    pub fn get_records(&self) -> GetRecordsUseCase {
        GetRecordsUseCase::new(Arc::new(SqliteRecordRepository::new(self.pool.clone())))
    }

    pub fn get_status(&self) -> GetStatusUseCase {
        GetStatusUseCase::new(
            Arc::new(SqliteZoneRepository::new(self.pool.clone())),
            Arc::new(SqliteQueryProgressRepository::new(self.pool.clone())),
        )
    }

    pub async fn domain_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM domains")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn record_count(&self, record_type: &str, source: &str) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM dns_records WHERE record_type = ? AND source = ?",
        )
        .bind(record_type)
        .bind(source)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn domain_id(&self, name: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM domains WHERE domain_name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
