use http::header::ACCEPT;

use crate::oauth2::config::OAuth2Config;
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{GitHubEmail, GitHubTokenResponse, GitHubUserInfo};

// GitHub's API rejects requests without a User-Agent
static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitHub OAuth2 app: code exchange and profile reads
#[derive(Clone, Debug)]
pub struct OAuth2Client {
    client: reqwest::Client,
    config: OAuth2Config,
}

impl OAuth2Client {
    pub fn new(config: OAuth2Config) -> Result<Self, OAuth2Error> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| OAuth2Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, OAuth2Error> {
        Self::new(OAuth2Config::from_env()?)
    }

    pub(crate) fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Exchange an authorization code for an access token.
    ///
    /// GitHub reports a rejected code (spent, expired, forged) as an `error`
    /// field in an otherwise successful response; that surfaces here as
    /// [`OAuth2Error::CodeRejected`] so callers can answer with a client
    /// error instead of a server error.
    pub(crate) async fn exchange_code_for_token(&self, code: &str) -> Result<String, OAuth2Error> {
        let response = self
            .client
            .post(&self.config.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        tracing::debug!("Token Exchange Response Body: {:#?}", response_body);

        let response_json: GitHubTokenResponse = match serde_json::from_str(&response_body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(OAuth2Error::TokenExchange(status.to_string()));
            }
            Err(e) => {
                return Err(OAuth2Error::TokenExchange(format!(
                    "Failed to deserialize token response: {e}"
                )));
            }
        };

        if let Some(error) = response_json.error {
            tracing::debug!(
                "Token endpoint rejected the code: {} ({})",
                error,
                response_json.error_description.unwrap_or_default()
            );
            return Err(OAuth2Error::CodeRejected(error));
        }

        if !status.is_success() {
            return Err(OAuth2Error::TokenExchange(status.to_string()));
        }

        response_json.access_token.ok_or_else(|| {
            OAuth2Error::TokenExchange("Access token not present in response".to_string())
        })
    }

    pub(crate) async fn fetch_github_user(
        &self,
        access_token: &str,
    ) -> Result<GitHubUserInfo, OAuth2Error> {
        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuth2Error::FetchUserInfo(response.status().to_string()));
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        tracing::debug!("Response Body: {:#?}", response_body);
        let user_data: GitHubUserInfo = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize response body: {e}")))?;

        tracing::debug!("User data: {:#?}", user_data);
        Ok(user_data)
    }

    pub(crate) async fn fetch_github_user_emails(
        &self,
        access_token: &str,
    ) -> Result<Vec<GitHubEmail>, OAuth2Error> {
        let response = self
            .client
            .get(&self.config.user_emails_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuth2Error::FetchUserInfo(response.status().to_string()));
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        tracing::debug!("Response Body: {:#?}", response_body);
        let emails: Vec<GitHubEmail> = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize response body: {e}")))?;

        Ok(emails)
    }
}

/// Pick the address GitHub marks as primary, if any
pub(crate) fn primary_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails.into_iter().find(|e| e.primary).map(|e| e.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth2::config::test_config;
    use crate::test_utils::spawn_json_responder;

    fn email(address: &str, primary: bool, verified: bool) -> GitHubEmail {
        GitHubEmail {
            email: address.to_string(),
            primary,
            verified,
            visibility: None,
        }
    }

    #[test]
    fn test_client_construction() {
        let client = OAuth2Client::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_primary_email_selects_primary_entry() {
        let emails = vec![
            email("work@example.com", false, true),
            email("home@example.com", true, true),
            email("old@example.com", false, false),
        ];

        assert_eq!(primary_email(emails), Some("home@example.com".to_string()));
    }

    #[test]
    fn test_primary_email_first_primary_wins() {
        let emails = vec![
            email("a@example.com", true, true),
            email("b@example.com", true, true),
        ];

        assert_eq!(primary_email(emails), Some("a@example.com".to_string()));
    }

    #[test]
    fn test_primary_email_none_when_no_primary() {
        let emails = vec![
            email("work@example.com", false, true),
            email("home@example.com", false, true),
        ];

        assert_eq!(primary_email(emails), None);
    }

    #[test]
    fn test_primary_email_empty_list() {
        assert_eq!(primary_email(Vec::new()), None);
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let base = spawn_json_responder(
            "200 OK",
            r#"{"access_token":"gho_testtoken","scope":"read:user,user:email","token_type":"bearer"}"#,
        )
        .await;

        let mut config = test_config();
        config.token_url = format!("{base}/login/oauth/access_token");
        let client = OAuth2Client::new(config).unwrap();

        let token = client.exchange_code_for_token("good_code").await.unwrap();
        assert_eq!(token, "gho_testtoken");
    }

    /// A spent or forged code comes back as a 200 with an error body
    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let base = spawn_json_responder(
            "200 OK",
            r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#,
        )
        .await;

        let mut config = test_config();
        config.token_url = format!("{base}/login/oauth/access_token");
        let client = OAuth2Client::new(config).unwrap();

        match client.exchange_code_for_token("spent_code").await {
            Err(OAuth2Error::CodeRejected(error)) => {
                assert_eq!(error, "bad_verification_code");
            }
            other => panic!("Expected CodeRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_unreachable_endpoint() {
        let mut config = test_config();
        // Nothing listens here
        config.token_url = "http://127.0.0.1:1/token".to_string();
        let client = OAuth2Client::new(config).unwrap();

        match client.exchange_code_for_token("some_code").await {
            Err(OAuth2Error::TokenExchange(_)) => {}
            other => panic!("Expected TokenExchange, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_github_user() {
        let base = spawn_json_responder(
            "200 OK",
            r#"{"id":583231,"login":"octocat","name":"The Octocat","email":null,"avatar_url":"https://avatars.example/583231","location":null}"#,
        )
        .await;

        let mut config = test_config();
        config.userinfo_url = format!("{base}/user");
        let client = OAuth2Client::new(config).unwrap();

        let user = client.fetch_github_user("gho_testtoken").await.unwrap();
        assert_eq!(user.id, 583231);
        assert_eq!(user.login, "octocat");
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn test_fetch_github_user_error_status() {
        let base = spawn_json_responder("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;

        let mut config = test_config();
        config.userinfo_url = format!("{base}/user");
        let client = OAuth2Client::new(config).unwrap();

        match client.fetch_github_user("bad_token").await {
            Err(OAuth2Error::FetchUserInfo(_)) => {}
            other => panic!("Expected FetchUserInfo, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_github_user_emails() {
        let base = spawn_json_responder(
            "200 OK",
            r#"[{"email":"octo@example.com","primary":true,"verified":true,"visibility":"private"}]"#,
        )
        .await;

        let mut config = test_config();
        config.user_emails_url = format!("{base}/user/emails");
        let client = OAuth2Client::new(config).unwrap();

        let emails = client
            .fetch_github_user_emails("gho_testtoken")
            .await
            .unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails[0].primary);
        assert_eq!(emails[0].email, "octo@example.com");
    }
}
