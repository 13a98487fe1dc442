//! Error type shared by every layer of monthlify.
//!
//! Errors are tagged so the retry policy can tell a rate limit or a flaky
//! gateway apart from a request that will never succeed (bad credentials, a
//! missing playlist, a malformed request).

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurateError {
    /// Missing or invalid settings. Raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller supplied an unusable combination of arguments.
    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("invalid playlist name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("rate limited by Spotify (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    /// Network hiccups, timeouts and 5xx answers.
    #[error("transient remote failure: {0}")]
    Transient(String),

    #[error("Spotify returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("cannot initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl CurateError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CurateError::RateLimited { .. } | CurateError::Transient(_)
        )
    }

    /// Classifies a non-success HTTP status with the response body as message.
    pub fn from_status(status: StatusCode, retry_after: Option<u64>, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            CurateError::RateLimited { retry_after }
        } else if status.is_server_error() {
            CurateError::Transient(format!("{}: {}", status, body))
        } else {
            CurateError::Remote {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

impl From<reqwest::Error> for CurateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            return CurateError::Transient(err.to_string());
        }

        match err.status() {
            Some(status) if status == StatusCode::TOO_MANY_REQUESTS => {
                CurateError::RateLimited { retry_after: None }
            }
            Some(status) if status.is_server_error() => CurateError::Transient(err.to_string()),
            _ => CurateError::Http(err),
        }
    }
}
