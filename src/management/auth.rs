use std::path::PathBuf;

use chrono::Utc;

use crate::{
    CurateError, Res, config,
    spotify::auth::{Credentials, refresh_token},
    types::Token,
};

/// Seconds before expiry at which the token is refreshed.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    credentials: Credentials,
}

impl TokenManager {
    pub fn new(token: Token, credentials: Credentials) -> Self {
        TokenManager { token, credentials }
    }

    pub async fn load(credentials: Credentials) -> Res<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            CurateError::Auth(format!("cannot read {}: {}", path.display(), e))
        })?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, credentials })
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first if it is
    /// about to expire.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            self.token = refresh_token(&self.credentials, &self.token.refresh_token).await?;
            if let Err(e) = self.persist().await {
                log::warn!("cannot persist refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN)
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
