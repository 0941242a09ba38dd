mod core;
mod github;

pub(crate) use core::csrf_checks;
pub use core::prepare_oauth2_auth_request;
pub use github::OAuth2Client;
pub(crate) use github::primary_email;
