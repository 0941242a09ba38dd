use chrono::{Duration, Utc};
use http::HeaderMap;

use crate::oauth2::{
    AuthResponse, OAUTH2_CSRF_COOKIE_NAME, OAuth2Account, csrf_checks, primary_email,
};
use crate::session::{User as SessionUser, get_session_id_from_headers, new_session_header};
use crate::state::AuthState;
use crate::userdb::{User as DbUser, UserSearchField};
use crate::utils::header_set_cookie;

use super::errors::CoordinationError;
use super::user::gen_new_user_id;

/// Handle the GitHub redirect-back leg of the authorization code flow.
///
/// Validates the callback against the state cookie, exchanges the code,
/// loads the remote profile, resolves an email, reconciles the identity
/// against the local store and issues a session. The returned headers carry
/// the session cookie plus an expiry for the spent state cookie; the HTTP
/// layer adds the redirect.
pub async fn get_authorized_core(
    state: &AuthState,
    auth_response: &AuthResponse,
    cookies: &headers::Cookie,
) -> Result<HeaderMap, CoordinationError> {
    csrf_checks(cookies, auth_response)?;

    let access_token = state
        .oauth2()
        .exchange_code_for_token(&auth_response.code)
        .await?;

    let github_user = state.oauth2().fetch_github_user(&access_token).await?;

    // A user who keeps their email off the public profile still exposes it
    // through the emails endpoint, marked primary
    let email = match &github_user.email {
        Some(email) => email.clone(),
        None => {
            let emails = state
                .oauth2()
                .fetch_github_user_emails(&access_token)
                .await?;
            primary_email(emails).ok_or_else(|| CoordinationError::NoEmailResolved.log())?
        }
    };

    let mut oauth2_account = OAuth2Account::from(github_user);
    oauth2_account.email = email;

    process_oauth2_authorization(state, oauth2_account).await
}

/// Reconcile a remote identity against the local store and open a session.
///
/// First match wins:
/// 1. the remote identity is already linked: sign its user in;
/// 2. a user exists with the same email: link the identity to it;
/// 3. otherwise create user and link in one transaction.
pub(crate) async fn process_oauth2_authorization(
    state: &AuthState,
    mut oauth2_account: OAuth2Account,
) -> Result<HeaderMap, CoordinationError> {
    let stored_oauth2_account = state
        .accounts()
        .get_oauth2_account_by_provider(&oauth2_account.provider, &oauth2_account.provider_user_id)
        .await?;

    let user_id = match stored_oauth2_account {
        Some(stored_oauth2_account) => {
            tracing::debug!("Signing in as {}", stored_oauth2_account.name);
            stored_oauth2_account.user_id
        }
        None => {
            let existing_user = state
                .users()
                .get_user_by(&UserSearchField::Email(oauth2_account.email.clone()))
                .await?;

            match existing_user {
                Some(existing_user) => {
                    tracing::debug!("Linking to existing user {}", existing_user.email);
                    oauth2_account.id = state.accounts().gen_unique_account_id().await?;
                    oauth2_account.user_id = existing_user.id.clone();
                    state.accounts().insert_oauth2_account(oauth2_account).await?;
                    existing_user.id
                }
                None => {
                    let name = oauth2_account.name.clone();
                    let user_id = create_user_and_oauth2account(state, oauth2_account).await?;
                    tracing::debug!("Created {}", name);
                    user_id
                }
            }
        }
    };

    let mut headers = new_session_header(state.sessions(), &user_id).await?;

    // The state cookie is single-use; expire it alongside setting the session
    header_set_cookie(
        &mut headers,
        OAUTH2_CSRF_COOKIE_NAME.to_string(),
        "value".to_string(),
        Utc::now() - Duration::seconds(86400),
        -86400,
    )?;

    Ok(headers)
}

// When creating a new user, its profile fields come from the remote account.
// We also assign the user_id to the oauth2_account.
async fn create_user_and_oauth2account(
    state: &AuthState,
    mut oauth2_account: OAuth2Account,
) -> Result<String, CoordinationError> {
    let new_user = DbUser::new(
        gen_new_user_id(state.users()).await?,
        oauth2_account.email.clone(),
        oauth2_account.name.clone(),
        oauth2_account.picture.clone(),
    );

    oauth2_account.id = state.accounts().gen_unique_account_id().await?;
    oauth2_account.user_id = new_user.id.clone();

    let stored_user = state
        .accounts()
        .create_user_and_account(&new_user, &oauth2_account)
        .await?;
    Ok(stored_user.id)
}

/// Load the user behind the request's session cookie, if any
pub async fn get_session_user_core(
    state: &AuthState,
    headers: &HeaderMap,
) -> Result<Option<SessionUser>, CoordinationError> {
    let Some(session_id) = get_session_id_from_headers(headers)? else {
        return Ok(None);
    };

    let Some(session) = state.sessions().get_session(session_id).await? else {
        return Ok(None);
    };

    let user = state
        .users()
        .get_user_by(&UserSearchField::Id(session.user_id.clone()))
        .await?;

    Ok(user.map(SessionUser::from))
}
