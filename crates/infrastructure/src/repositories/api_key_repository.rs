use async_trait::async_trait;
use bell_dns_application::ports::ApiKeyRepository;
use bell_dns_domain::DomainError;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::database::db_error;

pub struct SqliteApiKeyRepository {
    pool: SqlitePool,
}

impl SqliteApiKeyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for SqliteApiKeyRepository {
    #[instrument(skip_all)]
    async fn is_active(&self, api_key: &str) -> Result<Option<bool>, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT is_active FROM api_keys WHERE api_key = ?")
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to look up API key"))
    }
}
