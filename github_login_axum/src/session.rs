use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::{TypedHeader, headers};

use github_login::{AuthState, prepare_logout_response};

pub(super) fn router() -> Router<AuthState> {
    Router::new().route("/logout", get(logout))
}

/// Delete the session behind the request's cookie and send the browser home
async fn logout(
    State(state): State<AuthState>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(cookies)) = cookies else {
        // Nothing to tear down
        return Ok(Redirect::to("/").into_response());
    };

    let headers = prepare_logout_response(state.sessions(), cookies)
        .await
        .map_err(|e| {
            tracing::error!("Logout failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((headers, Redirect::to("/")).into_response())
}
