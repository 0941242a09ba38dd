use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn put(&mut self, prefix: &str, key: &str, value: CacheData) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.insert(key, value);
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        _ttl: usize,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.insert(key, value);
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        Ok(self.entry.get(&key).cloned())
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        let result = InMemoryCacheStore::make_key("session", "user123");
        assert_eq!(result, "cache:session:user123");
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "test value".to_string(),
        };

        store.put("test", "key1", value).await.unwrap();

        let retrieved = store.get("test", "key1").await.unwrap();
        assert_eq!(retrieved.unwrap().value, "test value");
    }

    #[tokio::test]
    async fn test_remove() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "value to remove".to_string(),
        };

        store.put("test", "key3", value).await.unwrap();
        store.remove("test", "key3").await.unwrap();

        let retrieved = store.get("test", "key3").await.unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let store = InMemoryCacheStore::new();

        let retrieved = store.get("test", "nonexistent").await.unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_multiple_prefixes() {
        let mut store = InMemoryCacheStore::new();

        let key = "same_key";
        let value1 = CacheData {
            value: "value for prefix1".to_string(),
        };
        let value2 = CacheData {
            value: "value for prefix2".to_string(),
        };

        store.put("prefix1", key, value1).await.unwrap();
        store.put("prefix2", key, value2).await.unwrap();

        let get1 = store.get("prefix1", key).await.unwrap().unwrap();
        let get2 = store.get("prefix2", key).await.unwrap().unwrap();

        assert_eq!(get1.value, "value for prefix1");
        assert_eq!(get2.value, "value for prefix2");
    }

    #[tokio::test]
    async fn test_overwrite_existing_key() {
        let mut store = InMemoryCacheStore::new();

        let original_value = CacheData {
            value: "original value".to_string(),
        };
        let new_value = CacheData {
            value: "new value".to_string(),
        };

        store.put("test", "key1", original_value).await.unwrap();
        store.put("test", "key1", new_value).await.unwrap();

        let retrieved = store.get("test", "key1").await.unwrap().unwrap();
        assert_eq!(retrieved.value, "new value");
    }
}
