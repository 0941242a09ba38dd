use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::OAuth2Account;
use crate::storage::DataStore;
use crate::userdb::User;
use crate::utils::gen_random_string;

use super::postgres::*;
use super::sqlite::*;

/// Access to the OAuth2 accounts table, backed by the injected [`DataStore`]
#[derive(Clone)]
pub struct OAuth2Store {
    store: DataStore,
}

impl OAuth2Store {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Generate a unique ID for an OAuth2 account
    /// This function checks if the generated ID already exists in the database
    /// and retries up to 3 times if there's a collision
    pub(crate) async fn gen_unique_account_id(&self) -> Result<String, OAuth2Error> {
        // Try up to 3 times to generate a unique ID
        for _ in 0..3 {
            let id = gen_random_string(32)?;

            // Check if an account with this ID already exists
            match self.get_oauth2_account_by_id(&id).await {
                Ok(None) => return Ok(id), // ID is unique, return it
                Ok(Some(_)) => continue,   // ID exists, try again
                Err(e) => {
                    return Err(OAuth2Error::Database(format!(
                        "Failed to check account ID: {}",
                        e
                    )));
                }
            }
        }

        // Collisions on 32 random bytes essentially never happen, but we
        // refuse to insert with a known-duplicate ID
        Err(OAuth2Error::Internal(
            "Failed to generate a unique OAuth2 account ID after multiple attempts".to_string(),
        ))
    }

    /// Initialize the OAuth2 database tables
    pub async fn init(&self) -> Result<(), OAuth2Error> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_oauth2_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_oauth2_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(OAuth2Error::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Get the account linked to a remote identity, if any
    pub(crate) async fn get_oauth2_account_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<OAuth2Account>, OAuth2Error> {
        if let Some(pool) = self.store.as_sqlite() {
            get_oauth2_account_by_provider_sqlite(pool, provider, provider_user_id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_oauth2_account_by_provider_postgres(pool, provider, provider_user_id).await
        } else {
            Err(OAuth2Error::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    pub(crate) async fn get_oauth2_account_by_id(
        &self,
        id: &str,
    ) -> Result<Option<OAuth2Account>, OAuth2Error> {
        if let Some(pool) = self.store.as_sqlite() {
            get_oauth2_account_by_id_sqlite(pool, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_oauth2_account_by_id_postgres(pool, id).await
        } else {
            Err(OAuth2Error::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Insert a new account linking a remote identity to an existing user
    pub(crate) async fn insert_oauth2_account(
        &self,
        account: OAuth2Account,
    ) -> Result<OAuth2Account, OAuth2Error> {
        if account.user_id.is_empty() {
            return Err(OAuth2Error::Internal(
                "Account must have a user_id before insertion".to_string(),
            ));
        }

        if let Some(pool) = self.store.as_sqlite() {
            insert_oauth2_account_sqlite(pool, account).await
        } else if let Some(pool) = self.store.as_postgres() {
            insert_oauth2_account_postgres(pool, account).await
        } else {
            Err(OAuth2Error::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Atomically insert a new user together with its first linked account
    pub(crate) async fn create_user_and_account(
        &self,
        user: &User,
        account: &OAuth2Account,
    ) -> Result<User, OAuth2Error> {
        if let Some(pool) = self.store.as_sqlite() {
            create_user_and_account_sqlite(pool, user, account).await
        } else if let Some(pool) = self.store.as_postgres() {
            create_user_and_account_postgres(pool, user, account).await
        } else {
            Err(OAuth2Error::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
