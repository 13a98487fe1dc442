use std::collections::HashSet;

use crate::{
    Res,
    curate::{Curator, pagination},
    spotify::SpotifyApi,
};

/// Spotify's limit of items per add request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Every track URI currently in the playlist, in playlist order.
///
/// Items without a track or URI (removed tracks, some local files) are skipped.
pub async fn playlist_track_uris<A: SpotifyApi + ?Sized>(
    api: &A,
    playlist_id: &str,
) -> Res<Vec<String>> {
    let items = pagination::playlist_tracks(api, playlist_id)
        .collect_all()
        .await?;

    Ok(items
        .iter()
        .filter_map(|item| item.uri().map(str::to_string))
        .collect())
}

/// Candidates absent from `existing`, in candidate order, each URI at most once.
pub fn novel_tracks<S: AsRef<str>>(existing: &HashSet<String>, candidates: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|uri| !existing.contains(*uri) && seen.insert(*uri))
        .map(str::to_string)
        .collect()
}

/// Inserts the candidates the playlist does not contain yet, in batches of at
/// most [`MAX_ITEMS_PER_REQUEST`]. Returns how many were inserted.
///
/// Running it again with the same candidates inserts nothing.
pub async fn add_tracks_dedup<A: SpotifyApi + ?Sized, S: AsRef<str>>(
    api: &A,
    playlist_id: &str,
    candidates: &[S],
) -> Res<usize> {
    if candidates.is_empty() {
        return Ok(0);
    }

    let existing: HashSet<String> = playlist_track_uris(api, playlist_id)
        .await?
        .into_iter()
        .collect();
    let to_add = novel_tracks(&existing, candidates);

    for batch in to_add.chunks(MAX_ITEMS_PER_REQUEST) {
        api.add_items(playlist_id, batch).await?;
        log::debug!("inserted batch of {} into {}", batch.len(), playlist_id);
    }

    Ok(to_add.len())
}

impl<A: SpotifyApi> Curator<A> {
    pub async fn playlist_track_uris(&self, playlist_id: &str) -> Res<Vec<String>> {
        self.retry
            .run("fetch playlist tracks", || {
                playlist_track_uris(&self.api, playlist_id)
            })
            .await
    }

    pub async fn add_tracks_dedup<S: AsRef<str>>(
        &self,
        playlist_id: &str,
        candidates: &[S],
    ) -> Res<usize> {
        self.retry
            .run("add tracks", || {
                add_tracks_dedup(&self.api, playlist_id, candidates)
            })
            .await
    }
}
