use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    CurateError, Res,
    config::{self, Settings},
    management::TokenManager,
    server::start_api_server,
    spotify::client::REQUEST_TIMEOUT,
    types::{AuthSession, Token, TokenResponse},
    utils, warning,
};

/// How long the flow waits for the browser to hit the callback.
const AUTH_WAIT: Duration = Duration::from_secs(60);

/// Client credentials and endpoints for the accounts service.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub redirect_uri: String,
}

impl From<&Settings> for Credentials {
    fn from(settings: &Settings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            token_url: settings.token_url.clone(),
            redirect_uri: settings.redirect_uri.clone(),
        }
    }
}

pub type SharedSession = Arc<Mutex<Option<AuthSession>>>;

/// Runs the authorization-code flow and persists the obtained token.
///
/// 1. Generates a random `state` value and stores it in the shared session
/// 2. Starts the local callback server on the redirect URI's address
/// 3. Opens the authorization URL in the browser
/// 4. Waits up to 60 seconds for the callback to exchange the code
/// 5. Saves the token to the token cache
///
/// # Errors
///
/// [`CurateError::Auth`] when the callback never delivers a token, plus any
/// error from persisting the token.
pub async fn authorize(settings: &Settings) -> Res<Token> {
    let state = utils::generate_state_token();
    let session: SharedSession = Arc::new(Mutex::new(Some(AuthSession {
        state: state.clone(),
        token: None,
    })));

    let bind_addr = utils::callback_bind_address(&settings.redirect_uri)?;
    let server_session = Arc::clone(&session);
    let credentials = Credentials::from(settings);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(bind_addr, server_session, credentials).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = reqwest::Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("state", state.as_str()),
            ("scope", config::SPOTIFY_SCOPE),
        ],
    )
    .map_err(|e| CurateError::Config(format!("invalid auth url: {}", e)))?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(session)
        .await
        .ok_or_else(|| CurateError::Auth("authentication failed or timed out".to_string()))?;

    TokenManager::new(token.clone(), Credentials::from(settings))
        .persist()
        .await?;

    Ok(token)
}

/// Polls the shared session until the callback stored a token.
async fn wait_for_token(session: SharedSession) -> Option<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < AUTH_WAIT {
        {
            let lock = session.lock().await;
            if let Some(token) = lock.as_ref().and_then(|s| s.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(credentials: &Credentials, code: &str) -> Res<Token> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ],
    )
    .await?;

    let refresh_token = response
        .refresh_token
        .clone()
        .ok_or_else(|| CurateError::Auth("token response without refresh token".to_string()))?;
    Ok(into_token(response, refresh_token))
}

/// Obtains a fresh access token. Keeps `refresh_token` if Spotify does not rotate it.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Res<Token> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    let refresh_token = response
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    Ok(into_token(response, refresh_token))
}

async fn request_token(credentials: &Credentials, form: &[(&str, &str)]) -> Res<TokenResponse> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = client
        .post(&credentials.token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CurateError::Auth(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    Ok(response.json::<TokenResponse>().await?)
}

fn into_token(response: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token,
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
