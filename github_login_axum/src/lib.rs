//! Axum integration for the github-login authentication library
//!
//! Mount [`router`] under [`AUTH_ROUTE_PREFIX`] (default `/api/auth`) to get
//! the full flow:
//!
//! - `GET {prefix}/login/github` sets the state cookie and redirects to
//!   GitHub's authorize page
//! - `GET {prefix}/callback/github` is the OAuth2 redirect-back leg;
//!   answers `302` to `/` on success, empty `400`/`500` on failure
//! - `GET {prefix}/logout` deletes the session and redirects to `/`

mod error;
mod oauth2;
mod session;

use axum::Router;

pub use github_login::{
    AUTH_ROUTE_PREFIX, AuthState, SESSION_COOKIE_NAME, SessionUser, get_session_user_core,
};

/// Build the authentication router over the injected [`AuthState`]
pub fn router(state: AuthState) -> Router {
    Router::new()
        .merge(oauth2::router())
        .merge(session::router())
        .with_state(state)
}
