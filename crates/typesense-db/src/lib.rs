//! # typesense-db
//!
//! Storage layer implementing the `KvStore` port from `typesense-core`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use typesense_common::AppConfig;
//! use typesense_db::open_store;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let store = open_store(&config.storage).await?;
//!     store.set("post:1:u", serde_json::json!({"text": "hi"})).await?;
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod pool;
pub mod stores;

use std::sync::Arc;

use tracing::info;
use typesense_common::{StorageBackend, StorageConfig};
use typesense_core::{DomainError, KvStore};

pub use pool::{create_pool, PgPool, PoolConfig};
pub use stores::{map_db_error, MemoryKvStore, PgKvStore};

/// Open the configured backend, creating the PostgreSQL schema if needed
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn KvStore>, DomainError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage backend");
            Ok(Arc::new(MemoryKvStore::new()))
        }
        StorageBackend::Postgres => {
            let database = config.database.as_ref().ok_or_else(|| {
                DomainError::StorageError("postgres backend requires DATABASE_URL".to_string())
            })?;
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(map_db_error)?;
            let store = PgKvStore::new(pool);
            store.ensure_schema().await?;
            info!("Connected to PostgreSQL storage backend");
            Ok(Arc::new(store))
        }
    }
}
