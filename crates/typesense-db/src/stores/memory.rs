//! In-memory implementation of KvStore
//!
//! Backs `STORAGE_BACKEND=memory` and the test suites. Contents are lost on
//! restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::instrument;

use typesense_core::traits::{KvStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.read().get(key).cloned())
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn scan_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Value)>> {
        let entries = self.entries.read();
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    #[instrument(skip(self, expected, new))]
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&Value>,
        new: Option<Value>,
    ) -> StoreResult<bool> {
        let mut entries = self.entries.write();
        if entries.get(key) != expected {
            return Ok(false);
        }
        match new {
            Some(value) => {
                entries.insert(key.to_string(), value);
            }
            None => {
                entries.remove(key);
            }
        }
        Ok(true)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryKvStore::new();
        store.set("post:1:a", json!({"text": "hi"})).await.unwrap();
        assert_eq!(store.get("post:1:a").await.unwrap(), Some(json!({"text": "hi"})));

        store.delete("post:1:a").await.unwrap();
        assert_eq!(store.get("post:1:a").await.unwrap(), None);
        // deleting twice is fine
        store.delete("post:1:a").await.unwrap();
    }

    #[tokio::test]
    async fn test_scan_respects_namespace_boundaries() {
        let store = MemoryKvStore::new();
        store.set("post:1:a", json!(1)).await.unwrap();
        store.set("post:2:b", json!(2)).await.unwrap();
        store.set("posts:9", json!(9)).await.unwrap();
        store.set("reactions:post:1:a", json!([])).await.unwrap();

        let mut keys: Vec<_> = store
            .scan_by_prefix("post:")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        keys.sort();
        assert_eq!(keys, ["post:1:a", "post:2:b"]);

        assert_eq!(store.scan_by_prefix("posts:").await.unwrap().len(), 1);
        assert!(store.scan_by_prefix("nothing:").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compare_and_swap() {
        let store = MemoryKvStore::new();

        // create only if absent
        assert!(store.compare_and_swap("k", None, Some(json!(1))).await.unwrap());
        assert!(!store.compare_and_swap("k", None, Some(json!(2))).await.unwrap());

        // replace only if unchanged
        assert!(!store
            .compare_and_swap("k", Some(&json!(7)), Some(json!(2)))
            .await
            .unwrap());
        assert!(store
            .compare_and_swap("k", Some(&json!(1)), Some(json!(2)))
            .await
            .unwrap());

        // conditional delete
        assert!(store.compare_and_swap("k", Some(&json!(2)), None).await.unwrap());
        assert!(store.is_empty());
        assert!(store.compare_and_swap("k", None, None).await.unwrap());
    }
}
