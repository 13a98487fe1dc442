use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    spotify::auth::{Credentials, SharedSession, exchange_code},
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(session): Extension<SharedSession>,
    Extension(credentials): Extension<Credentials>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut lock = session.lock().await;
    let Some(auth_session) = lock.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&auth_session.state) {
        warning!("Callback state does not match, ignoring it.");
        return Html("<h4>State mismatch.</h4>");
    }

    match exchange_code(&credentials, code).await {
        Ok(token) => {
            auth_session.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
