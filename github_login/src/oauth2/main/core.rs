use headers::Cookie;
use http::header::HeaderMap;

use chrono::{Duration, Utc};

use crate::oauth2::config::{OAUTH2_CSRF_COOKIE_MAX_AGE, OAUTH2_CSRF_COOKIE_NAME};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::AuthResponse;
use crate::utils::{gen_random_string, header_set_cookie};

use super::github::OAuth2Client;

/// Build the GitHub authorization URL and the `Set-Cookie` header that
/// stores the freshly generated state value.
///
/// The state round-trips through GitHub and is compared against the cookie
/// by [`csrf_checks`] when the browser comes back.
pub fn prepare_oauth2_auth_request(
    client: &OAuth2Client,
) -> Result<(String, HeaderMap), OAuth2Error> {
    let state = gen_random_string(32)?;
    let expires_at = Utc::now() + Duration::seconds(*OAUTH2_CSRF_COOKIE_MAX_AGE as i64);

    let config = client.config();
    let auth_url = format!(
        "{}?client_id={}&redirect_uri={}&scope={}&state={}",
        config.auth_url,
        config.client_id,
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&config.scope),
        state,
    );

    tracing::debug!("Auth URL: {:#?}", auth_url);

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        OAUTH2_CSRF_COOKIE_NAME.to_string(),
        state,
        expires_at,
        *OAUTH2_CSRF_COOKIE_MAX_AGE as i64,
    )?;

    Ok((auth_url, headers))
}

/// Validate the callback parameters against the state cookie.
///
/// Requires a non-empty code, a non-empty state, a non-empty stored cookie,
/// and exact equality between state and cookie. Anything else is a
/// protocol error the caller answers with `400`.
pub(crate) fn csrf_checks(cookies: &Cookie, query: &AuthResponse) -> Result<(), OAuth2Error> {
    if query.code.is_empty() {
        return Err(OAuth2Error::MissingAuthCode);
    }
    if query.state.is_empty() {
        return Err(OAuth2Error::MissingState);
    }

    let stored_state = cookies
        .get(OAUTH2_CSRF_COOKIE_NAME.as_str())
        .ok_or_else(|| OAuth2Error::SecurityTokenNotFound("No state cookie found".to_string()))?;

    if stored_state.is_empty() {
        return Err(OAuth2Error::SecurityTokenNotFound(
            "Empty state cookie".to_string(),
        ));
    }

    // Compare the state from the query with the value stored in the cookie
    if query.state != stored_state {
        tracing::error!("State in query: {:#?}", query.state);
        tracing::error!("Stored state: {:#?}", stored_state);
        return Err(OAuth2Error::CsrfTokenMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth2::config::test_config;
    use headers::HeaderMapExt;
    use http::header::{COOKIE, SET_COOKIE};
    use serde_json::json;

    fn create_auth_response(code: &str, state: &str) -> AuthResponse {
        serde_json::from_value(json!({"code": code, "state": state})).unwrap()
    }

    fn create_cookies(header_value: &str) -> Cookie {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header_value.parse().unwrap());
        headers.typed_get::<Cookie>().expect("valid cookie header")
    }

    #[test]
    fn test_prepare_auth_request_url_and_cookie() {
        let client = OAuth2Client::new(test_config()).unwrap();

        let (auth_url, headers) = prepare_oauth2_auth_request(&client).unwrap();

        assert!(auth_url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(auth_url.contains("client_id=test_client_id"));
        assert!(auth_url.contains("state="));
        assert!(auth_url.contains("scope=read%3Auser%20user%3Aemail"));

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("github_oauth_state="));
        assert!(cookie.contains("HttpOnly"));

        // The state in the URL is the state in the cookie
        let state_in_url = auth_url.rsplit("state=").next().unwrap();
        assert!(cookie.contains(state_in_url));
    }

    #[test]
    fn test_prepare_auth_request_unique_state_per_call() {
        let client = OAuth2Client::new(test_config()).unwrap();

        let (first, _) = prepare_oauth2_auth_request(&client).unwrap();
        let (second, _) = prepare_oauth2_auth_request(&client).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_csrf_checks_success() {
        let query = create_auth_response("some_code", "state123");
        let cookies = create_cookies("github_oauth_state=state123");

        assert!(csrf_checks(&cookies, &query).is_ok());
    }

    #[test]
    fn test_csrf_checks_missing_code() {
        let query = create_auth_response("", "state123");
        let cookies = create_cookies("github_oauth_state=state123");

        match csrf_checks(&cookies, &query) {
            Err(OAuth2Error::MissingAuthCode) => {}
            other => panic!("Expected MissingAuthCode, got {:?}", other),
        }
    }

    #[test]
    fn test_csrf_checks_missing_state() {
        let query = create_auth_response("some_code", "");
        let cookies = create_cookies("github_oauth_state=state123");

        match csrf_checks(&cookies, &query) {
            Err(OAuth2Error::MissingState) => {}
            other => panic!("Expected MissingState, got {:?}", other),
        }
    }

    #[test]
    fn test_csrf_checks_missing_cookie() {
        let query = create_auth_response("some_code", "state123");
        let cookies = create_cookies("other_cookie=value");

        match csrf_checks(&cookies, &query) {
            Err(OAuth2Error::SecurityTokenNotFound(_)) => {}
            other => panic!("Expected SecurityTokenNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_csrf_checks_state_mismatch() {
        let query = create_auth_response("some_code", "state123");
        let cookies = create_cookies("github_oauth_state=different_state");

        match csrf_checks(&cookies, &query) {
            Err(OAuth2Error::CsrfTokenMismatch) => {}
            other => panic!("Expected CsrfTokenMismatch, got {:?}", other),
        }
    }
}
