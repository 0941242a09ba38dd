use std::{env, sync::LazyLock};

use crate::config::AUTH_ROUTE_PREFIX;
use crate::oauth2::errors::OAuth2Error;

/// Provider identifier recorded on linked accounts
pub(crate) const OAUTH2_PROVIDER_ID: &str = "github";

const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USERINFO_URL: &str = "https://api.github.com/user";
const GITHUB_USER_EMAILS_URL: &str = "https://api.github.com/user/emails";

// `read:user` for the profile, `user:email` so the emails endpoint lists
// addresses the user keeps off their public profile.
const GITHUB_DEFAULT_SCOPE: &str = "read:user user:email";

/// Name of the cookie carrying the state value set when login is initiated
pub static OAUTH2_CSRF_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OAUTH2_CSRF_COOKIE_NAME")
        .ok()
        .unwrap_or("github_oauth_state".to_string())
});

pub(crate) static OAUTH2_CSRF_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("OAUTH2_CSRF_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600) // Default to 10 minutes if not set or invalid
});

/// Endpoints and credentials for the GitHub OAuth2 app
///
/// Built from the environment at startup; every URL can be overridden, which
/// is how the tests point the client at a local mock server.
#[derive(Clone, Debug)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub user_emails_url: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl OAuth2Config {
    pub fn from_env() -> Result<Self, OAuth2Error> {
        let client_id = env::var("OAUTH2_GITHUB_CLIENT_ID").map_err(|_| {
            OAuth2Error::MissingConfig("OAUTH2_GITHUB_CLIENT_ID must be set".to_string())
        })?;
        let client_secret = env::var("OAUTH2_GITHUB_CLIENT_SECRET").map_err(|_| {
            OAuth2Error::MissingConfig("OAUTH2_GITHUB_CLIENT_SECRET must be set".to_string())
        })?;

        let redirect_uri = match env::var("OAUTH2_REDIRECT_URI") {
            Ok(uri) => uri,
            Err(_) => {
                let origin = env::var("ORIGIN")
                    .map_err(|_| OAuth2Error::MissingConfig("ORIGIN must be set".to_string()))?;
                format!("{}{}/callback/github", origin, AUTH_ROUTE_PREFIX.as_str())
            }
        };

        Ok(Self {
            client_id,
            client_secret,
            auth_url: env::var("OAUTH2_AUTH_URL").unwrap_or_else(|_| GITHUB_AUTH_URL.to_string()),
            token_url: env::var("OAUTH2_TOKEN_URL")
                .unwrap_or_else(|_| GITHUB_TOKEN_URL.to_string()),
            userinfo_url: env::var("OAUTH2_USERINFO_URL")
                .unwrap_or_else(|_| GITHUB_USERINFO_URL.to_string()),
            user_emails_url: env::var("OAUTH2_USER_EMAILS_URL")
                .unwrap_or_else(|_| GITHUB_USER_EMAILS_URL.to_string()),
            redirect_uri,
            scope: env::var("OAUTH2_SCOPE").unwrap_or_else(|_| GITHUB_DEFAULT_SCOPE.to_string()),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> OAuth2Config {
    OAuth2Config {
        client_id: "test_client_id".to_string(),
        client_secret: "test_client_secret".to_string(),
        auth_url: GITHUB_AUTH_URL.to_string(),
        token_url: GITHUB_TOKEN_URL.to_string(),
        userinfo_url: GITHUB_USERINFO_URL.to_string(),
        user_emails_url: GITHUB_USER_EMAILS_URL.to_string(),
        redirect_uri: "https://app.example.com/api/auth/callback/github".to_string(),
        scope: GITHUB_DEFAULT_SCOPE.to_string(),
    }
}
