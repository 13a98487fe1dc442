//! # CLI Module
//!
//! User-facing commands. Each command loads what it needs (token, settings,
//! state), delegates to an orchestrator in [`crate::curate`] and prints the
//! result unchanged.
//!
//! ## Commands
//!
//! - [`auth`] - Authorize monthlify with Spotify
//! - [`monthly`] - Add this month's liked songs to this month's playlist
//! - [`weekly`] - Archive Discover Weekly into the archive playlist
//! - [`delete`] - Delete playlists matching a pattern (dry run by default)
//! - [`backfill`] - Build monthly playlists for past months
//! - [`status`] - Show the last monthly run and the naming in use
//!
//! ## Usage Patterns
//!
//! ```bash
//! monthlify auth
//! monthlify monthly
//! monthlify backfill --since 2024-01 --until 2024-06
//! monthlify delete --pattern '^Monthly 2023' --execute
//! ```
//!
//! Failures end the process with a red error line through [`crate::error!`].

mod auth;
mod backfill;
mod delete;
mod monthly;
mod status;
mod weekly;

pub use auth::auth;
pub use backfill::backfill;
pub use delete::delete;
pub use monthly::monthly;
pub use status::status;
pub use weekly::weekly;

use crate::{
    config::Settings,
    curate::Curator,
    error,
    management::TokenManager,
    spotify::{SpotifyApi, SpotifyClient, auth::Credentials},
};

/// Loads the cached token and resolves the current user.
async fn connect(settings: &Settings) -> Curator<SpotifyClient> {
    let tokens = match TokenManager::load(Credentials::from(settings)).await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run monthlify auth\n Error: {}",
                e
            );
        }
    };

    let client = match SpotifyClient::new(settings, tokens) {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client: {}", e),
    };

    let user = match client.current_user().await {
        Ok(u) => u,
        Err(e) => error!("Cannot fetch current user: {}", e),
    };
    log::debug!("signed in as {}", user.id);

    Curator::new(client, user.id)
}
