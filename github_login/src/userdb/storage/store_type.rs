use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

/// Read access to the users table, backed by the injected [`DataStore`]
#[derive(Clone)]
pub struct UserStore {
    store: DataStore,
}

impl UserStore {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Initialize the user database tables
    pub async fn init(&self) -> Result<(), UserError> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by a search field
    pub(crate) async fn get_user_by(
        &self,
        field: &UserSearchField,
    ) -> Result<Option<User>, UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_user_by_field_sqlite(pool, field).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_user_by_field_postgres(pool, field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Create or update a user
    pub(crate) async fn upsert_user(&self, user: User) -> Result<User, UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = self.store.as_postgres() {
            upsert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> UserStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = UserStore::new(DataStore::Sqlite(pool));
        store.init().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_init_creates_and_validates_tables() {
        let store = test_store().await;

        // init is idempotent
        store.init().await.unwrap();
    }

    #[tokio::test]
    async fn test_get_user_by_id_not_found() {
        let store = test_store().await;

        let user = store
            .get_user_by(&UserSearchField::Id("missing".to_string()))
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_upsert_and_get_user() {
        let store = test_store().await;

        let user = User::new(
            "user1".to_string(),
            "one@example.com".to_string(),
            "User One".to_string(),
            None,
        );
        let stored = store.upsert_user(user).await.unwrap();
        assert_eq!(stored.sequence_number, Some(1));

        let by_id = store
            .get_user_by(&UserSearchField::Id("user1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.email, "one@example.com");

        let by_email = store
            .get_user_by(&UserSearchField::Email("one@example.com".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, "user1");
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_user() {
        let store = test_store().await;

        let user = User::new(
            "user1".to_string(),
            "one@example.com".to_string(),
            "User One".to_string(),
            None,
        );
        store.upsert_user(user.clone()).await.unwrap();

        let renamed = User {
            name: "Renamed".to_string(),
            ..user
        };
        let stored = store.upsert_user(renamed).await.unwrap();

        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.sequence_number, Some(1));
    }
}
