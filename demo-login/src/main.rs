use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github_login::{AUTH_ROUTE_PREFIX, AuthState};

mod handlers;

use crate::handlers::{index, protected};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,github_login=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build the collaborators once and hand clones to the routers
    let state = AuthState::from_env().await?;
    state.init().await?;

    let app = Router::new()
        .route("/", get(index))
        .route("/protected", get(protected))
        .with_state(state.clone())
        .nest(AUTH_ROUTE_PREFIX.as_str(), github_login_axum::router(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
