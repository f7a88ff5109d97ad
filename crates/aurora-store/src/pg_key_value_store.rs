//! `PostgreSQL` implementation of the `KeyValueStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

use aurora_core::error::DomainError;
use aurora_core::store::KeyValueStore;

use crate::schema::CREATE_KV_TABLE;

fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("key-value store error: {e}"))
}

/// PostgreSQL-backed key-value store. Writes are upserts; there is no
/// read-modify-write transaction, so concurrent increments may lose an
/// update.
#[derive(Debug, Clone)]
pub struct PgKeyValueStore {
    pool: PgPool,
}

impl PgKeyValueStore {
    /// Creates a new `PgKeyValueStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_KV_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PgKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let row = sqlx::query_scalar::<_, Json<serde_json::Value>>(
            "SELECT value FROM kv_entries WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;
        debug!(key, hit = row.is_some(), "kv get");
        Ok(row.map(|Json(value)| value))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;
        debug!(key, "kv set");
        Ok(())
    }
}
