use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    CurateError, Res,
    config::Settings,
    management::TokenManager,
    spotify::SpotifyApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, Page, PlaylistItem, SavedTrack, SimplifiedPlaylist,
    },
};

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PLAYLIST_ITEM_FIELDS: &str = "items(track(uri)),next,total";

/// HTTP implementation of [`SpotifyApi`].
///
/// Requests are sent one at a time. The access token is refreshed through
/// the [`TokenManager`] whenever it is about to expire.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(settings: &Settings, tokens: TokenManager) -> Res<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Res<Response> {
        let token = self.tokens.lock().await.get_valid_token().await?;
        let response = request.bearer_auth(token).send().await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Res<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns a non-success response into a tagged error.
async fn check_status(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    } else {
        None
    };
    let body = response.text().await.unwrap_or_default();

    Err(CurateError::from_status(status, retry_after, body))
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn current_user(&self) -> Res<CurrentUser> {
        self.get_json(self.http.get(self.url("/me"))).await
    }

    async fn current_user_playlists(
        &self,
        offset: u32,
        limit: u32,
    ) -> Res<Page<SimplifiedPlaylist>> {
        let request = self
            .http
            .get(self.url("/me/playlists"))
            .query(&[("limit", limit), ("offset", offset)]);
        self.get_json(request).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: String::new(),
            public,
        };
        let request = self
            .http
            .post(self.url(&format!("/users/{}/playlists", user_id)))
            .json(&body);
        self.get_json(request).await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistItem>> {
        let request = self
            .http
            .get(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .query(&[
                ("fields", PLAYLIST_ITEM_FIELDS.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ]);
        self.get_json(request).await
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self
            .http
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .json(&body);
        let snapshot: AddTrackToPlaylistResponse = self.get_json(request).await?;
        log::debug!(
            "added {} items to {} (snapshot {})",
            uris.len(),
            playlist_id,
            snapshot.snapshot_id
        );
        Ok(())
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()> {
        let request = self
            .http
            .delete(self.url(&format!("/playlists/{}/followers", playlist_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn saved_tracks(&self, offset: u32, limit: u32) -> Res<Page<SavedTrack>> {
        let request = self
            .http
            .get(self.url("/me/tracks"))
            .query(&[("limit", limit), ("offset", offset)]);
        self.get_json(request).await
    }
}
