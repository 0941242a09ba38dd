use std::sync::Arc;

use chrono::{Duration, Utc};
use headers::Cookie;
use http::header::{COOKIE, HeaderMap};
use tokio::sync::Mutex;

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::types::StoredSession;
use crate::storage::{CacheStore, InMemoryCacheStore, StorageError, cache_store_from_env};
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Session issuance and lookup over the injected [`CacheStore`]
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<Mutex<Box<dyn CacheStore>>>,
}

impl SessionStore {
    pub fn new(store: Box<dyn CacheStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn new_in_memory() -> Self {
        Self::new(Box::new(InMemoryCacheStore::new()))
    }

    /// Build the session store from `GENERIC_CACHE_STORE_TYPE` and
    /// `GENERIC_CACHE_STORE_URL`
    pub async fn from_env() -> Result<Self, StorageError> {
        Ok(Self::new(cache_store_from_env().await?))
    }

    /// Create a session for the user and return its token
    pub(crate) async fn create_session(
        &self,
        user_id: &str,
    ) -> Result<(String, StoredSession), SessionError> {
        let session_id = gen_random_string(32)?;
        let expires_at = Utc::now() + Duration::seconds(*SESSION_COOKIE_MAX_AGE as i64);

        let stored_session = StoredSession {
            user_id: user_id.to_string(),
            expires_at,
            ttl: *SESSION_COOKIE_MAX_AGE,
        };

        self.store
            .lock()
            .await
            .put_with_ttl(
                SESSION_PREFIX,
                &session_id,
                stored_session.clone().into(),
                *SESSION_COOKIE_MAX_AGE as usize,
            )
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok((session_id, stored_session))
    }

    /// Load a live session. Expired sessions are removed and reported as
    /// absent, covering in-memory stores that have no TTL eviction.
    pub(crate) async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<Option<StoredSession>, SessionError> {
        let cached_session = self
            .store
            .lock()
            .await
            .get(SESSION_PREFIX, session_id)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        let Some(cached_session) = cached_session else {
            return Ok(None);
        };

        let stored_session: StoredSession = cached_session.try_into()?;

        if stored_session.expires_at < Utc::now() {
            tracing::debug!("Session expired at {}", stored_session.expires_at);
            self.delete_session(session_id).await?;
            return Ok(None);
        }

        Ok(Some(stored_session))
    }

    pub(crate) async fn delete_session(&self, session_id: &str) -> Result<(), SessionError> {
        self.store
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Create a session for the user and return the `Set-Cookie` header for it
pub(crate) async fn new_session_header(
    sessions: &SessionStore,
    user_id: &str,
) -> Result<HeaderMap, SessionError> {
    let (session_id, stored_session) = sessions.create_session(user_id).await?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.to_string(),
        session_id,
        stored_session.expires_at,
        *SESSION_COOKIE_MAX_AGE as i64,
    )?;

    tracing::debug!("Headers: {:#?}", headers);
    Ok(headers)
}

/// Prepare a logout response by removing the session cookie and deleting the
/// session from storage
pub async fn prepare_logout_response(
    sessions: &SessionStore,
    cookies: Cookie,
) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.to_string(),
        "value".to_string(),
        Utc::now() - Duration::seconds(86400),
        -86400,
    )?;

    if let Some(session_id) = cookies.get(SESSION_COOKIE_NAME.as_str()) {
        sessions.delete_session(session_id).await?;
    }

    Ok(headers)
}

pub(crate) fn get_session_id_from_headers(
    headers: &HeaderMap,
) -> Result<Option<&str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::debug!("No cookie header found");
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let cookie_name = SESSION_COOKIE_NAME.as_str();

    let session_id = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    });

    if session_id.is_none() {
        tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    }

    Ok(session_id)
}
