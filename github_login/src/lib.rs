//! github_login - GitHub OAuth2 login for Rust web applications
//!
//! This crate implements the redirect-back leg of a GitHub "Authorization
//! Code" login flow: validating the callback against a state cookie,
//! exchanging the code for an access token, loading the remote profile,
//! reconciling it against the local user/account store and opening a
//! session. The login-initiation and logout legs around it are included so
//! the flow is usable end to end.
//!
//! Collaborators (OAuth2 client, user store, account store, session store)
//! are bundled into an [`AuthState`] that callers construct once and inject
//! into their request handlers.

mod config;
mod coordination;
mod oauth2;
mod session;
mod state;
mod storage;
#[cfg(test)]
mod test_utils;
mod userdb;
mod utils;

// Re-export the main coordination components
pub use coordination::{CoordinationError, get_authorized_core, get_session_user_core};

// Re-export the route prefix
pub use config::AUTH_ROUTE_PREFIX;

pub use oauth2::{
    AuthResponse, OAUTH2_CSRF_COOKIE_NAME, OAuth2Account, OAuth2Client, OAuth2Config, OAuth2Error,
    OAuth2Store, prepare_oauth2_auth_request,
};

pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionStore, User as SessionUser, prepare_logout_response,
};

pub use state::AuthState;

pub use storage::{CacheData, CacheStore, DataStore, StorageError};

pub use userdb::{User, UserError, UserStore};
