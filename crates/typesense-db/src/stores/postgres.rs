//! PostgreSQL implementation of KvStore
//!
//! One `kv_store` table with JSONB values. Conditional writes rely on JSONB
//! equality, which ignores object key order and whitespace.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use typesense_core::traits::{KvStore, StoreResult};

use crate::models::KvRow;

use super::error::map_db_error;

/// PostgreSQL implementation of KvStore
#[derive(Clone)]
pub struct PgKvStore {
    pool: PgPool,
}

impl PgKvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table and its prefix index if missing
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        // PRIMARY KEY uses the database collation, which LIKE 'prefix%' cannot use
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS kv_store_key_prefix_idx ON kv_store (key text_pattern_ops)",
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!("kv_store schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Turn a key prefix into a LIKE pattern matching it literally
pub(crate) fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl KvStore for PgKvStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let row = sqlx::query_as::<_, KvRow>("SELECT key, value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(|row| row.value.0))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn scan_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Value)>> {
        let rows = sqlx::query_as::<_, KvRow>(
            r"SELECT key, value FROM kv_store WHERE key LIKE $1 ESCAPE '\'",
        )
        .bind(like_prefix_pattern(prefix))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(count = rows.len(), "prefix scan");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, expected, new))]
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&Value>,
        new: Option<Value>,
    ) -> StoreResult<bool> {
        let result = match (expected, new) {
            (None, Some(new)) => {
                sqlx::query(
                    r#"
                    INSERT INTO kv_store (key, value, updated_at)
                    VALUES ($1, $2, now())
                    ON CONFLICT (key) DO NOTHING
                    "#,
                )
                .bind(key)
                .bind(Json(new))
                .execute(&self.pool)
                .await
            }
            (Some(expected), Some(new)) => {
                sqlx::query(
                    "UPDATE kv_store SET value = $2, updated_at = now() WHERE key = $1 AND value = $3",
                )
                .bind(key)
                .bind(Json(new))
                .bind(Json(expected))
                .execute(&self.pool)
                .await
            }
            (Some(expected), None) => {
                sqlx::query("DELETE FROM kv_store WHERE key = $1 AND value = $2")
                    .bind(key)
                    .bind(Json(expected))
                    .execute(&self.pool)
                    .await
            }
            (None, None) => {
                // Nothing to write; succeeds only if the key is still absent
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM kv_store WHERE key = $1)",
                )
                .bind(key)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;
                return Ok(!exists);
            }
        };

        let swapped = result.map_err(map_db_error)?.rows_affected() == 1;
        debug!(swapped, "compare and swap");
        Ok(swapped)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
