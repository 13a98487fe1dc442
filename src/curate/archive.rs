use crate::{
    Res,
    curate::{Curator, pagination},
    spotify::SpotifyApi,
};

/// Name of the rotating recommendation playlist, compared case-insensitively.
pub const DISCOVER_WEEKLY_NAME: &str = "discover weekly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveResult {
    /// No playlist named Discover Weekly in the user's library.
    SourceNotFound,
    Archived { playlist_id: String, archived: usize },
}

impl ArchiveResult {
    pub fn archived(&self) -> usize {
        match self {
            ArchiveResult::SourceNotFound => 0,
            ArchiveResult::Archived { archived, .. } => *archived,
        }
    }
}

/// Id of the first playlist whose name equals `name` ignoring case.
///
/// Stops paging as soon as it is found.
pub async fn find_playlist_by_name<A: SpotifyApi + ?Sized>(
    api: &A,
    name: &str,
) -> Res<Option<String>> {
    let wanted = name.to_lowercase();
    let mut walker = pagination::user_playlists(api);

    while let Some(page) = walker.next_page().await? {
        if let Some(found) = page.into_iter().find(|p| p.name.to_lowercase() == wanted) {
            return Ok(Some(found.id));
        }
    }

    Ok(None)
}

impl<A: SpotifyApi> Curator<A> {
    /// Copies Discover Weekly into the cumulative archive playlist `archive_name`.
    pub async fn run_discover_weekly_archive(&self, archive_name: &str) -> Res<ArchiveResult> {
        let source = self
            .retry
            .run("find Discover Weekly", || {
                find_playlist_by_name(&self.api, DISCOVER_WEEKLY_NAME)
            })
            .await?;

        let Some(source_id) = source else {
            log::info!("no Discover Weekly playlist found");
            return Ok(ArchiveResult::SourceNotFound);
        };

        let playlist_id = self.ensure_playlist(archive_name, false).await?;
        let uris = self.playlist_track_uris(&source_id).await?;
        let archived = self.add_tracks_dedup(&playlist_id, &uris).await?;

        Ok(ArchiveResult::Archived {
            playlist_id,
            archived,
        })
    }
}
