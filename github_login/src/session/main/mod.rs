mod session;

pub use session::{SessionStore, prepare_logout_response};
pub(crate) use session::{get_session_id_from_headers, new_session_header};
