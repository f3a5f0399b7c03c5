//! Storage port - the key-addressed table every record lives in
//!
//! The domain defines what it needs; `typesense-db` provides the
//! PostgreSQL and in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DomainError;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value stored under `key`
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Insert or overwrite `key`
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// All `(key, value)` pairs whose key starts with `prefix`, in no
    /// particular order
    async fn scan_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Value)>>;

    /// Atomically replace the value under `key` if it still equals `expected`
    ///
    /// `expected = None` means the key must be absent; `new = None` deletes
    /// it. Returns `false` without writing when the current value differs.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&Value>,
        new: Option<Value>,
    ) -> StoreResult<bool>;

    /// Cheap round trip to the backend
    async fn health_check(&self) -> StoreResult<()>;
}
