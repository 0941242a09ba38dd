use crate::utils::UtilError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Missing authorization code")]
    MissingAuthCode,

    #[error("Missing state parameter")]
    MissingState,

    #[error("Security token not found: {0}")]
    SecurityTokenNotFound(String),

    #[error("Csrf token mismatch")]
    CsrfTokenMismatch,

    #[error("Authorization code rejected: {0}")]
    CodeRejected(String),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl OAuth2Error {
    /// Whether this error means the request itself was bad (missing or
    /// mismatched callback parameters, or the provider rejecting the
    /// authorization code), as opposed to an internal failure.
    ///
    /// Protocol errors map to `400 Bad Request`; everything else is a `500`.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAuthCode
                | Self::MissingState
                | Self::SecurityTokenNotFound(_)
                | Self::CsrfTokenMismatch
                | Self::CodeRejected(_)
        )
    }
}
