use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::{CurateError, Res};

/// Random value for the OAuth `state` parameter.
pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// `host:port` the callback server must listen on to receive `redirect_uri`.
pub fn callback_bind_address(redirect_uri: &str) -> Res<String> {
    let url = reqwest::Url::parse(redirect_uri)
        .map_err(|e| CurateError::Config(format!("invalid redirect uri {:?}: {}", redirect_uri, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| CurateError::Config(format!("redirect uri {:?} has no host", redirect_uri)))?;
    let port = url.port_or_known_default().ok_or_else(|| {
        CurateError::Config(format!("redirect uri {:?} has no port", redirect_uri))
    })?;

    Ok(format!("{}:{}", host, port))
}

/// Steady spinner shown while a command talks to Spotify.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
