//! Database row models

use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Row of the `kv_store` table
#[derive(Debug, Clone, FromRow)]
pub struct KvRow {
    pub key: String,
    pub value: Json<Value>,
}

impl From<KvRow> for (String, Value) {
    fn from(row: KvRow) -> Self {
        (row.key, row.value.0)
    }
}
