//! # Curation Module
//!
//! Idempotent synchronisation between the paginated Spotify listings and the
//! playlists monthlify maintains.
//!
//! ```text
//! run_monthly / run_monthly_backfill / run_discover_weekly_archive / run_delete
//!          ↓
//! ensure_playlist   add_tracks_dedup   bucket_saved_tracks
//!          ↓
//! PageWalker  →  SpotifyApi
//! ```
//!
//! - [`pagination`] - Offset paging over any listing endpoint
//! - [`resolver`] - Find-or-create a playlist owned by the current user
//! - [`dedup`] - Insert only tracks a playlist does not contain yet
//! - [`months`] - Month keys and playlist naming
//! - [`bucketing`] - Group saved tracks by the month they were liked in
//! - [`monthly`], [`archive`], [`delete`] - The orchestrators
//!
//! Every operation runs its remote calls one after another. Operations that
//! touch remote state go through the [`RetryPolicy`] of the [`Curator`].

pub mod archive;
pub mod bucketing;
pub mod dedup;
pub mod delete;
pub mod monthly;
pub mod months;
pub mod pagination;
pub mod resolver;
pub mod retry;

pub use archive::{ArchiveResult, DISCOVER_WEEKLY_NAME};
pub use bucketing::MonthBuckets;
pub use delete::{DeleteResult, PlaylistMatch};
pub use monthly::{BackfillResult, MonthRange, MonthResult, MonthlyResult};
pub use months::{MonthFormat, MonthKey, MonthNaming, format_month};
pub use pagination::{PageSource, PageWalker};
pub use retry::RetryPolicy;

use crate::spotify::SpotifyApi;

/// Runs curation operations for one user against a [`SpotifyApi`].
pub struct Curator<A> {
    api: A,
    user_id: String,
    retry: RetryPolicy,
}

impl<A: SpotifyApi> Curator<A> {
    pub fn new(api: A, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
