use crate::coordination::CoordinationError;
use crate::oauth2::{OAuth2Client, OAuth2Store};
use crate::session::SessionStore;
use crate::storage::DataStore;
use crate::userdb::UserStore;

/// The collaborators behind the login flow, bundled for injection into
/// request handlers.
///
/// Built once at startup and cloned per request; every component is a cheap
/// handle. Tests assemble one over in-memory backends via [`AuthState::new`].
#[derive(Clone)]
pub struct AuthState {
    oauth2: OAuth2Client,
    users: UserStore,
    accounts: OAuth2Store,
    sessions: SessionStore,
}

impl AuthState {
    pub fn new(
        oauth2: OAuth2Client,
        users: UserStore,
        accounts: OAuth2Store,
        sessions: SessionStore,
    ) -> Self {
        Self {
            oauth2,
            users,
            accounts,
            sessions,
        }
    }

    /// Assemble the full state from environment variables
    pub async fn from_env() -> Result<Self, CoordinationError> {
        let oauth2 = OAuth2Client::from_env()?;
        let data_store = DataStore::from_env()?;
        let sessions = SessionStore::from_env().await?;

        Ok(Self::new(
            oauth2,
            UserStore::new(data_store.clone()),
            OAuth2Store::new(data_store),
            sessions,
        ))
    }

    /// Create and validate the database tables
    pub async fn init(&self) -> Result<(), CoordinationError> {
        self.users.init().await?;
        self.accounts.init().await?;
        Ok(())
    }

    pub fn oauth2(&self) -> &OAuth2Client {
        &self.oauth2
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub(crate) fn users(&self) -> &UserStore {
        &self.users
    }

    pub(crate) fn accounts(&self) -> &OAuth2Store {
        &self.accounts
    }
}
