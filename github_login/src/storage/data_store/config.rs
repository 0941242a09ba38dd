//! Database configuration

use std::{env, str::FromStr, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::DataStore;

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "login_".to_string()));

impl DataStore {
    /// Build the data store from `GENERIC_DATA_STORE_TYPE` and
    /// `GENERIC_DATA_STORE_URL`. Connections are established lazily.
    pub fn from_env() -> Result<Self, StorageError> {
        let store_type = env::var("GENERIC_DATA_STORE_TYPE")
            .map_err(|_| StorageError::Storage("GENERIC_DATA_STORE_TYPE must be set".to_string()))?;
        let store_url = env::var("GENERIC_DATA_STORE_URL")
            .map_err(|_| StorageError::Storage("GENERIC_DATA_STORE_URL must be set".to_string()))?;

        tracing::info!(
            "Initializing data store with type: {}, url: {}",
            store_type,
            store_url
        );

        match store_type.as_str() {
            "sqlite" => {
                let opts = sqlx::sqlite::SqliteConnectOptions::from_str(&store_url)
                    .map_err(|e| {
                        StorageError::Storage(format!(
                            "Failed to parse SQLite connection string: {e}"
                        ))
                    })?
                    .create_if_missing(true);

                Ok(Self::Sqlite(sqlx::sqlite::SqlitePool::connect_lazy_with(
                    opts,
                )))
            }
            "postgres" => {
                let pool = sqlx::PgPool::connect_lazy(&store_url).map_err(|e| {
                    StorageError::Storage(format!("Failed to create Postgres pool: {e}"))
                })?;
                Ok(Self::Postgres(pool))
            }
            t => Err(StorageError::Storage(format!(
                "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper struct to safely manage environment variables during tests
    struct EnvVarGuard {
        key: String,
        original_value: Option<String>,
    }

    impl EnvVarGuard {
        fn new(key: &str, value: &str) -> Self {
            let original_value = env::var(key).ok();

            unsafe {
                env::set_var(key, value);
            }

            Self {
                key: key.to_string(),
                original_value,
            }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.original_value {
                    Some(value) => env::set_var(&self.key, value),
                    None => env::remove_var(&self.key),
                }
            }
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_from_env_sqlite() {
        let _type_guard = EnvVarGuard::new("GENERIC_DATA_STORE_TYPE", "sqlite");
        let _url_guard = EnvVarGuard::new("GENERIC_DATA_STORE_URL", "sqlite::memory:");

        let store = DataStore::from_env().unwrap();
        assert!(store.as_sqlite().is_some());
        assert!(store.as_postgres().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_unsupported_type() {
        let _type_guard = EnvVarGuard::new("GENERIC_DATA_STORE_TYPE", "unsupported");
        let _url_guard = EnvVarGuard::new("GENERIC_DATA_STORE_URL", "sqlite::memory:");

        let result = DataStore::from_env();
        match result {
            Err(StorageError::Storage(msg)) => {
                assert!(msg.contains("Unsupported store type"));
            }
            _ => panic!("Expected Storage error for unsupported type"),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_missing_type() {
        let original = env::var("GENERIC_DATA_STORE_TYPE").ok();
        unsafe {
            env::remove_var("GENERIC_DATA_STORE_TYPE");
        }

        let result = DataStore::from_env();
        assert!(result.is_err());

        if let Some(value) = original {
            unsafe {
                env::set_var("GENERIC_DATA_STORE_TYPE", value);
            }
        }
    }

    #[test]
    fn test_db_table_prefix_default() {
        // Test the same logic the LazyLock uses
        let original = env::var("DB_TABLE_PREFIX").ok();
        unsafe {
            env::remove_var("DB_TABLE_PREFIX");
        }

        let prefix = env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "login_".to_string());
        assert_eq!(prefix, "login_");

        if let Some(value) = original {
            unsafe {
                env::set_var("DB_TABLE_PREFIX", value);
            }
        }
    }
}
