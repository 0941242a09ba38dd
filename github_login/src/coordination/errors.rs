//! Error types for the coordination layer

use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur during authentication coordination
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// General coordination error
    #[error("Coordination error: {0}")]
    Coordination(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// The remote identity exposed no public email and no primary address
    #[error("No email could be resolved for the remote identity")]
    NoEmailResolved,

    /// Error from OAuth2 operations
    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from storage operations
    #[error("Storage error: {0}")]
    StorageError(StorageError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::Coordination(msg) => tracing::error!("Coordination error: {}", msg),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::NoEmailResolved => {
                tracing::error!("No email could be resolved for the remote identity")
            }
            Self::OAuth2Error(err) => tracing::error!("OAuth2 error: {}", err),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::StorageError(err) => tracing::error!("Storage error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        let error = Self::OAuth2Error(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        let error = Self::StorageError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_error_display() {
        let err = CoordinationError::Coordination("test error".to_string());
        assert_eq!(err.to_string(), "Coordination error: test error");

        let err = CoordinationError::Database("db error".to_string());
        assert_eq!(err.to_string(), "Database error: db error");

        let err = CoordinationError::NoEmailResolved;
        assert_eq!(
            err.to_string(),
            "No email could be resolved for the remote identity"
        );
    }

    #[test]
    fn test_from_oauth2_error() {
        let oauth2_err = OAuth2Error::CsrfTokenMismatch;
        let err: CoordinationError = oauth2_err.into();

        match err {
            CoordinationError::OAuth2Error(OAuth2Error::CsrfTokenMismatch) => {}
            other => panic!("Wrong error type: {:?}", other),
        }
    }

    #[test]
    fn test_from_user_error() {
        let user_err = UserError::Storage("user db error".to_string());
        let err: CoordinationError = user_err.into();

        match err {
            CoordinationError::UserError(UserError::Storage(msg)) => {
                assert_eq!(msg, "user db error");
            }
            other => panic!("Wrong error type: {:?}", other),
        }
    }

    #[test]
    fn test_from_session_error() {
        let session_err = SessionError::Storage("session storage error".to_string());
        let err: CoordinationError = session_err.into();

        assert!(matches!(err, CoordinationError::SessionError(_)));
    }

    #[test]
    fn test_error_log_returns_self() {
        let err = CoordinationError::Coordination("test error".to_string());
        let logged_err = err.log();

        match logged_err {
            CoordinationError::Coordination(msg) => assert_eq!(msg, "test error"),
            other => panic!("Wrong error type after logging: {:?}", other),
        }
    }
}
