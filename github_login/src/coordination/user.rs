use crate::userdb::{UserSearchField, UserStore};
use crate::utils::gen_random_string;

use super::errors::CoordinationError;

// generate a unique user ID, with built-in collision detection
pub(super) async fn gen_new_user_id(users: &UserStore) -> Result<String, CoordinationError> {
    // Try up to 3 times to generate a unique ID
    for _ in 0..3 {
        let id = gen_random_string(32)?;

        // Check if a user with this ID already exists
        match users.get_user_by(&UserSearchField::Id(id.clone())).await {
            Ok(None) => return Ok(id), // ID is unique, return it
            Ok(Some(_)) => continue,   // ID exists, try again
            Err(e) => {
                return Err(
                    CoordinationError::Database(format!("Failed to check user ID: {}", e)).log(),
                );
            }
        }
    }

    // Statistically unreachable with 32 random bytes, but handled anyway
    Err(CoordinationError::Coordination(
        "Failed to generate a unique user ID after multiple attempts".to_string(),
    )
    .log())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DataStore;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_gen_new_user_id_unique() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let users = UserStore::new(DataStore::Sqlite(pool));
        users.init().await.unwrap();

        let a = gen_new_user_id(&users).await.unwrap();
        let b = gen_new_user_id(&users).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
    }
}
