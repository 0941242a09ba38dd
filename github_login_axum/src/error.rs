use github_login::{CoordinationError, OAuth2Error};
use http::StatusCode;

/// Helper trait for collapsing coordination errors into bare status codes
///
/// Responses carry no error detail; everything useful is already in the
/// logs by the time the error reaches this layer.
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, StatusCode>;
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, StatusCode> {
        self.map_err(|e| {
            let status = match &e {
                // Bad or mismatched callback parameters, or the provider
                // rejecting the authorization code
                CoordinationError::OAuth2Error(inner) if inner.is_protocol_error() => {
                    StatusCode::BAD_REQUEST
                }
                CoordinationError::NoEmailResolved => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::debug!("Responding {} for: {}", status, e);
            status
        })
    }
}
