use std::env;

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

/// Build the cache store from `GENERIC_CACHE_STORE_TYPE` and
/// `GENERIC_CACHE_STORE_URL`. Redis connectivity is verified up front.
pub(crate) async fn cache_store_from_env() -> Result<Box<dyn CacheStore>, StorageError> {
    let store_type = env::var("GENERIC_CACHE_STORE_TYPE")
        .map_err(|_| StorageError::Storage("GENERIC_CACHE_STORE_TYPE must be set".to_string()))?;

    tracing::info!("Initializing cache store with type: {}", store_type);

    let store: Box<dyn CacheStore> = match store_type.as_str() {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let store_url = env::var("GENERIC_CACHE_STORE_URL").map_err(|_| {
                StorageError::Storage("GENERIC_CACHE_STORE_URL must be set".to_string())
            })?;
            let client = redis::Client::open(store_url.as_str()).map_err(|e| {
                tracing::error!("Failed to create Redis client: {}", e);
                StorageError::Storage(format!("Failed to create Redis client: {e}"))
            })?;
            let store = RedisCacheStore { client };
            store.init().await.map_err(|e| {
                tracing::error!("Failed to connect to Redis: {}", e);
                e
            })?;
            Box::new(store)
        }
        t => {
            return Err(StorageError::Storage(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    tracing::info!("Connected to cache store: type={}", store_type);

    Ok(store)
}
