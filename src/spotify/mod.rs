//! # Spotify Integration Module
//!
//! The integration layer between monthlify and the Spotify Web API.
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Curation Layer (Curator, orchestrators)
//!          ↓
//! SpotifyApi trait  ←  SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Authorization-code flow, code exchange and token refresh
//! - [`client`] - [`SpotifyClient`], the HTTP implementation of [`SpotifyApi`]
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user id
//! - `GET /me/playlists` - Playlists of the current user (offset paging)
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `GET /playlists/{id}/tracks` - Playlist items, restricted to track URIs
//! - `POST /playlists/{id}/tracks` - Add up to 100 items
//! - `DELETE /playlists/{id}/followers` - Unfollow (delete) a playlist
//! - `GET /me/tracks` - Saved tracks, newest first
//!
//! ## Errors
//!
//! Every call reports a [`crate::CurateError`]. Rate limits, timeouts and 5xx
//! answers are tagged transient; the retry policy in [`crate::curate`] only
//! retries those.

pub mod auth;
pub mod client;

use async_trait::async_trait;

pub use client::SpotifyClient;

use crate::{
    Res,
    types::{CreatePlaylistResponse, CurrentUser, Page, PlaylistItem, SavedTrack, SimplifiedPlaylist},
};

/// The remote operations monthlify needs from Spotify.
///
/// Listing calls are offset paginated; callers walk them with
/// [`crate::curate::PageWalker`].
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn current_user(&self) -> Res<CurrentUser>;

    async fn current_user_playlists(&self, offset: u32, limit: u32)
    -> Res<Page<SimplifiedPlaylist>>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse>;

    /// Items of a playlist with only their track URI populated.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistItem>>;

    /// Appends `uris` to the playlist. Spotify accepts at most 100 per call.
    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<()>;

    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()>;

    /// Saved tracks of the current user, newest first.
    async fn saved_tracks(&self, offset: u32, limit: u32) -> Res<Page<SavedTrack>>;
}
