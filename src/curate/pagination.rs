use async_trait::async_trait;

use crate::{
    Res,
    spotify::SpotifyApi,
    types::{Page, PlaylistItem, SavedTrack, SimplifiedPlaylist},
};

/// Page size for the user's playlist listing.
pub const PLAYLISTS_PAGE_SIZE: u32 = 50;
/// Page size for playlist items.
pub const PLAYLIST_ITEMS_PAGE_SIZE: u32 = 100;
/// Page size for the saved-tracks feed.
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

/// An offset-paginated listing endpoint.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch(&self, offset: u32, limit: u32) -> Res<Page<Self::Item>>;
}

/// Lazily walks a [`PageSource`], one request per page.
///
/// The offset advances by the page size while the server reports a next
/// page. An empty page ends the walk. Errors are returned as-is and leave the
/// walker positioned on the failed page, so calling [`next_page`](Self::next_page)
/// again retries it. [`restart`](Self::restart) rewinds to the first page.
pub struct PageWalker<S> {
    source: S,
    limit: u32,
    offset: u32,
    exhausted: bool,
    pages_fetched: usize,
}

impl<S: PageSource> PageWalker<S> {
    pub fn new(source: S, limit: u32) -> Self {
        Self {
            source,
            limit: limit.max(1),
            offset: 0,
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Res<Option<Vec<S::Item>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.source.fetch(self.offset, self.limit).await?;
        self.pages_fetched += 1;
        log::debug!(
            "fetched page at offset {} ({} items, more: {})",
            self.offset,
            page.items.len(),
            page.has_more()
        );

        if page.items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        if page.has_more() {
            self.offset += self.limit;
        } else {
            self.exhausted = true;
        }

        Ok(Some(page.items))
    }

    /// Drains every remaining page into one vector.
    pub async fn collect_all(&mut self) -> Res<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    pub fn restart(&mut self) {
        self.offset = 0;
        self.exhausted = false;
    }

    /// Number of page requests that succeeded so far, across restarts.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

/// The current user's playlists.
pub struct UserPlaylists<'a, A: ?Sized>(pub &'a A);

/// Items of a single playlist.
pub struct PlaylistTracks<'a, A: ?Sized> {
    pub api: &'a A,
    pub playlist_id: &'a str,
}

/// The current user's saved tracks, newest first.
pub struct SavedTracks<'a, A: ?Sized>(pub &'a A);

#[async_trait]
impl<'a, A: SpotifyApi + ?Sized> PageSource for UserPlaylists<'a, A> {
    type Item = SimplifiedPlaylist;

    async fn fetch(&self, offset: u32, limit: u32) -> Res<Page<SimplifiedPlaylist>> {
        self.0.current_user_playlists(offset, limit).await
    }
}

#[async_trait]
impl<'a, A: SpotifyApi + ?Sized> PageSource for PlaylistTracks<'a, A> {
    type Item = PlaylistItem;

    async fn fetch(&self, offset: u32, limit: u32) -> Res<Page<PlaylistItem>> {
        self.api.playlist_items(self.playlist_id, offset, limit).await
    }
}

#[async_trait]
impl<'a, A: SpotifyApi + ?Sized> PageSource for SavedTracks<'a, A> {
    type Item = SavedTrack;

    async fn fetch(&self, offset: u32, limit: u32) -> Res<Page<SavedTrack>> {
        self.0.saved_tracks(offset, limit).await
    }
}

pub fn user_playlists<A: SpotifyApi + ?Sized>(api: &A) -> PageWalker<UserPlaylists<'_, A>> {
    PageWalker::new(UserPlaylists(api), PLAYLISTS_PAGE_SIZE)
}

pub fn playlist_tracks<'a, A: SpotifyApi + ?Sized>(
    api: &'a A,
    playlist_id: &'a str,
) -> PageWalker<PlaylistTracks<'a, A>> {
    PageWalker::new(PlaylistTracks { api, playlist_id }, PLAYLIST_ITEMS_PAGE_SIZE)
}

pub fn saved_tracks<A: SpotifyApi + ?Sized>(api: &A) -> PageWalker<SavedTracks<'_, A>> {
    PageWalker::new(SavedTracks(api), SAVED_TRACKS_PAGE_SIZE)
}
