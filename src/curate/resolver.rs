use crate::{
    Res,
    curate::{Curator, pagination},
    spotify::SpotifyApi,
};

/// Returns the id of the first playlist named exactly `name` and owned by
/// `user_id`, creating one when the whole listing has no match.
///
/// Two concurrent runs may both miss and both create a playlist; Spotify has
/// no conditional create to prevent it.
pub async fn ensure_playlist<A: SpotifyApi + ?Sized>(
    api: &A,
    user_id: &str,
    name: &str,
    public: bool,
) -> Res<String> {
    let mut walker = pagination::user_playlists(api);
    while let Some(page) = walker.next_page().await? {
        if let Some(found) = page
            .into_iter()
            .find(|p| p.name == name && p.owned_by(user_id))
        {
            log::debug!("found playlist {:?} ({})", name, found.id);
            return Ok(found.id);
        }
    }

    let created = api.create_playlist(user_id, name, public).await?;
    log::info!("created playlist {:?} ({})", name, created.id);
    Ok(created.id)
}

impl<A: SpotifyApi> Curator<A> {
    /// [`ensure_playlist`] for the curator's user, under the retry policy.
    pub async fn ensure_playlist(&self, name: &str, public: bool) -> Res<String> {
        self.retry
            .run("ensure playlist", || {
                ensure_playlist(&self.api, &self.user_id, name, public)
            })
            .await
    }
}
