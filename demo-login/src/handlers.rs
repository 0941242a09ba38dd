use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
};

use github_login::{AUTH_ROUTE_PREFIX, AuthState, get_session_user_core};

pub(crate) async fn index(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Html<String>, StatusCode> {
    let user = get_session_user_core(&state, &headers)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let prefix = AUTH_ROUTE_PREFIX.as_str();
    let body = match user {
        Some(user) => format!(
            "<h1>Hello, {}!</h1>\
             <p><a href=\"/protected\">Protected page</a></p>\
             <p><a href=\"{prefix}/logout\">Log out</a></p>",
            user.name
        ),
        None => format!(
            "<h1>Welcome</h1>\
             <p><a href=\"{prefix}/login/github\">Sign in with GitHub</a></p>"
        ),
    };

    Ok(Html(body))
}

pub(crate) async fn protected(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Html<String>, StatusCode> {
    let user = get_session_user_core(&state, &headers)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Html(format!(
        "<h1>Protected</h1><p>Signed in as {} &lt;{}&gt;</p>",
        user.name, user.email
    )))
}
