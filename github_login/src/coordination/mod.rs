mod errors;
mod github;
mod user;

pub use errors::CoordinationError;
pub use github::{get_authorized_core, get_session_user_core};
