mod config;
mod errors;
mod main;
mod types;

pub use config::SESSION_COOKIE_NAME; // Required for cookie configuration
pub use errors::SessionError;
pub use main::{SessionStore, prepare_logout_response};
pub use types::User; // Required for session data

pub(crate) use main::{get_session_id_from_headers, new_session_header};
