use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION},
    response::Redirect,
    routing::get,
};
use axum_extra::{TypedHeader, headers};

use github_login::{
    AuthResponse, AuthState, CoordinationError, get_authorized_core, prepare_oauth2_auth_request,
};

use super::error::IntoResponseError;

pub(super) fn router() -> Router<AuthState> {
    Router::new()
        .route("/login/github", get(github_auth))
        .route("/callback/github", get(get_authorized))
}

/// Start the login flow: set the state cookie and send the browser to GitHub
async fn github_auth(State(state): State<AuthState>) -> Result<(HeaderMap, Redirect), StatusCode> {
    let (auth_url, headers) = prepare_oauth2_auth_request(state.oauth2())
        .map_err(CoordinationError::from)
        .into_response_error()?;

    Ok((headers, Redirect::to(&auth_url)))
}

/// Handle the redirect back from GitHub.
///
/// On success answers `302 Found` to `/` with the session cookie set; on
/// failure an empty `400` or `500` (axum's `Redirect` sends `303`, so the
/// status and `Location` header are assembled by hand here).
async fn get_authorized(
    State(state): State<AuthState>,
    Query(query): Query<AuthResponse>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> Result<(StatusCode, HeaderMap), StatusCode> {
    let Some(TypedHeader(cookies)) = cookies else {
        tracing::debug!("Callback request carried no cookies");
        return Err(StatusCode::BAD_REQUEST);
    };

    let mut headers = get_authorized_core(&state, &query, &cookies)
        .await
        .into_response_error()?;

    headers.insert(LOCATION, HeaderValue::from_static("/"));
    Ok((StatusCode::FOUND, headers))
}
