//! Configuration management for monthlify.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Values already present in the process
//! environment win over the file.
//!
//! Credentials are the only mandatory values. Everything else falls back to a
//! default so a fresh install only needs the client id and secret.

use std::{env, path::PathBuf};

use crate::{
    CurateError, Res,
    curate::{MonthFormat, MonthNaming},
};

pub const APP_NAME: &str = "monthlify";

/// OAuth scopes needed by every command.
pub const SPOTIFY_SCOPE: &str =
    "user-library-read playlist-modify-public playlist-modify-private playlist-read-private";

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5000/callback";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MONTHLY_PREFIX: &str = "Monthly";
pub const DEFAULT_ARCHIVE_PREFIX: &str = "Discover Weekly Archive";
pub const DEFAULT_MONTHLY_FORMAT: &str = "month_year";

/// Returns the per-application data directory.
///
/// - Linux: `~/.local/share/monthlify`
/// - macOS: `~/Library/Application Support/monthlify`
/// - Windows: `%LOCALAPPDATA%/monthlify`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_NAME);
    path
}

/// Loads environment variables from `<data dir>/.env`.
///
/// Creates the data directory if needed. A missing `.env` is not an error:
/// the settings may come from the process environment alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| CurateError::Config(format!("cannot load {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub monthly_prefix: String,
    pub archive_prefix: String,
    pub monthly_format: MonthFormat,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// # Environment
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `SPOTIFY_API_AUTH_CLIENT_ID` | required |
    /// | `SPOTIFY_API_AUTH_CLIENT_SECRET` | required |
    /// | `SPOTIFY_API_REDIRECT_URI` | `http://127.0.0.1:5000/callback` |
    /// | `SPOTIFY_MONTH_PREFIX` | `Monthly` |
    /// | `SPOTIFY_ARCHIVE_PREFIX` | `Discover Weekly Archive` |
    /// | `SPOTIFY_MONTHLY_FORMAT` | `month_year` |
    /// | `SPOTIFY_API_URL` | `https://api.spotify.com/v1` |
    /// | `SPOTIFY_API_AUTH_URL` | `https://accounts.spotify.com/authorize` |
    /// | `SPOTIFY_API_TOKEN_URL` | `https://accounts.spotify.com/api/token` |
    ///
    /// # Errors
    ///
    /// [`CurateError::Config`] when a credential is missing or the monthly
    /// format carries an invalid date template.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Res<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CurateError::Config(format!("{} must be set", key)))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let client_id = required("SPOTIFY_API_AUTH_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_API_AUTH_CLIENT_SECRET")?;
        let monthly_format = or_default("SPOTIFY_MONTHLY_FORMAT", DEFAULT_MONTHLY_FORMAT)
            .parse::<MonthFormat>()?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            monthly_prefix: or_default("SPOTIFY_MONTH_PREFIX", DEFAULT_MONTHLY_PREFIX),
            archive_prefix: or_default("SPOTIFY_ARCHIVE_PREFIX", DEFAULT_ARCHIVE_PREFIX),
            monthly_format,
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
        })
    }

    /// Naming rule for monthly playlists.
    pub fn month_naming(&self) -> MonthNaming {
        MonthNaming::new(&self.monthly_prefix, self.monthly_format.clone())
    }

    /// Name of the cumulative Discover Weekly archive playlist.
    pub fn archive_name(&self) -> String {
        match self.archive_prefix.trim() {
            "" => DEFAULT_ARCHIVE_PREFIX.to_string(),
            name => name.to_string(),
        }
    }
}
