use regex::Regex;
use tabled::Tabled;

use crate::{
    Res,
    curate::{Curator, pagination},
    spotify::SpotifyApi,
};

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PlaylistMatch {
    pub id: String,
    pub name: String,
}

/// Outcome of a pattern delete. Nothing was deleted when `dry_run` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub matched: usize,
    pub playlists: Vec<PlaylistMatch>,
    pub dry_run: bool,
}

/// Playlists whose name contains a match for `pattern` (unanchored search).
pub async fn matching_playlists<A: SpotifyApi + ?Sized>(
    api: &A,
    pattern: &Regex,
) -> Res<Vec<PlaylistMatch>> {
    let playlists = pagination::user_playlists(api).collect_all().await?;

    Ok(playlists
        .into_iter()
        .filter(|p| pattern.is_match(&p.name))
        .map(|p| PlaylistMatch {
            id: p.id,
            name: p.name,
        })
        .collect())
}

impl<A: SpotifyApi> Curator<A> {
    /// Deletes (unfollows) every playlist whose name matches `pattern`.
    ///
    /// An invalid pattern fails before any request is sent. The playlists are
    /// listed once; each unfollow is retried on its own, so the result lists
    /// every match even when an unfollow needed several attempts.
    pub async fn run_delete(&self, pattern: &str, dry_run: bool) -> Res<DeleteResult> {
        let pattern = Regex::new(pattern)?;
        let playlists = self
            .retry
            .run("list playlists", || matching_playlists(&self.api, &pattern))
            .await?;

        if !dry_run {
            for playlist in &playlists {
                self.retry
                    .run("unfollow playlist", || {
                        self.api.unfollow_playlist(&playlist.id)
                    })
                    .await?;
                log::info!("unfollowed {:?} ({})", playlist.name, playlist.id);
            }
        }

        Ok(DeleteResult {
            matched: playlists.len(),
            playlists,
            dry_run,
        })
    }
}
