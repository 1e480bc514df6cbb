use bell_dns_infrastructure::repositories::{
    SqliteApiKeyRepository, SqliteDomainRepository, SqliteQueryProgressRepository,
    SqliteRecordRepository, SqliteZoneRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub zones: Arc<SqliteZoneRepository>,
    pub domains: Arc<SqliteDomainRepository>,
    pub records: Arc<SqliteRecordRepository>,
    pub progress: Arc<SqliteQueryProgressRepository>,
    pub api_keys: Arc<SqliteApiKeyRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            zones: Arc::new(SqliteZoneRepository::new(pool.clone())),
            domains: Arc::new(SqliteDomainRepository::new(pool.clone())),
            records: Arc::new(SqliteRecordRepository::new(pool.clone())),
            progress: Arc::new(SqliteQueryProgressRepository::new(pool.clone())),
            api_keys: Arc::new(SqliteApiKeyRepository::new(pool)),
        }
    }
}
