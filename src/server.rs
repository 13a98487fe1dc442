use axum::{Extension, Router, routing::get};

use crate::{
    Res, api,
    spotify::auth::{Credentials, SharedSession},
};

/// Routes of the local OAuth server.
pub fn router(session: SharedSession, credentials: Credentials) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(session))
        .layer(Extension(credentials))
}

/// Serves `/health` and `/callback` until the process exits.
pub async fn start_api_server(
    bind_addr: String,
    session: SharedSession,
    credentials: Credentials,
) -> Res<()> {
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(session, credentials)).await?;
    Ok(())
}
