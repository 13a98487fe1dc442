#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use monthlify::{
    CurateError, Res,
    curate::{Curator, RetryPolicy},
    spotify::SpotifyApi,
    types::{
        CreatePlaylistResponse, CurrentUser, Page, PlaylistItem, PlaylistOwner, SavedTrack,
        SimplifiedPlaylist, TrackRef,
    },
};

pub const USER: &str = "me";

#[derive(Debug, Clone)]
pub struct FakePlaylist {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub public: bool,
    pub tracks: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Transient,
    Terminal,
}

#[derive(Default)]
struct State {
    playlists: Vec<FakePlaylist>,
    saved: Vec<SavedTrack>,
    next_id: usize,
    calls: usize,
    playlist_pages: usize,
    item_pages: usize,
    saved_pages: usize,
    created: Vec<String>,
    add_calls: Vec<(String, Vec<String>)>,
    unfollowed: Vec<String>,
    failures: VecDeque<Failure>,
    scheduled: HashMap<usize, Failure>,
}

/// In-memory Spotify account that records every call.
#[derive(Default)]
pub struct FakeSpotify {
    state: Mutex<State>,
}

pub fn saved(uri: &str, added_at: &str) -> SavedTrack {
    SavedTrack {
        added_at: Some(added_at.to_string()),
        track: Some(TrackRef {
            uri: Some(uri.to_string()),
        }),
    }
}

pub fn curator(api: FakeSpotify) -> Curator<FakeSpotify> {
    Curator::new(api, USER).with_retry(RetryPolicy::immediate(5))
}

fn page_of<T: Clone>(all: &[T], offset: u32, limit: u32) -> Page<T> {
    let start = (offset as usize).min(all.len());
    let end = (start + limit as usize).min(all.len());
    let next = (end < all.len()).then(|| format!("offset={}", end));
    let mut page = Page::new(all[start..end].to_vec(), next);
    page.total = Some(all.len() as u64);
    page
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(self, name: &str, owner: &str, tracks: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = format!("pl{}", state.next_id);
            state.playlists.push(FakePlaylist {
                id,
                name: name.to_string(),
                owner: owner.to_string(),
                public: false,
                tracks: tracks.iter().map(|t| t.to_string()).collect(),
            });
        }
        self
    }

    pub fn with_saved(self, uri: &str, added_at: &str) -> Self {
        self.with_saved_item(saved(uri, added_at))
    }

    pub fn with_saved_item(self, item: SavedTrack) -> Self {
        self.state.lock().unwrap().saved.push(item);
        self
    }

    pub fn fail_next(&self, failures: &[Failure]) {
        self.state
            .lock()
            .unwrap()
            .failures
            .extend(failures.iter().copied());
    }

    /// Fails the `call`-th API call (1-based, counted over all endpoints).
    pub fn fail_on_call(&self, call: usize, failure: Failure) {
        self.state.lock().unwrap().scheduled.insert(call, failure);
    }

    pub fn playlists(&self) -> Vec<FakePlaylist> {
        self.state.lock().unwrap().playlists.clone()
    }

    pub fn playlist_named(&self, name: &str) -> Option<FakePlaylist> {
        self.playlists().into_iter().find(|p| p.name == name)
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn playlist_pages(&self) -> usize {
        self.state.lock().unwrap().playlist_pages
    }

    pub fn saved_pages(&self) -> usize {
        self.state.lock().unwrap().saved_pages
    }

    pub fn created(&self) -> Vec<String> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn add_calls(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().add_calls.clone()
    }

    pub fn unfollowed(&self) -> Vec<String> {
        self.state.lock().unwrap().unfollowed.clone()
    }

    fn begin_call(&self) -> Res<()> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let call = state.calls;
        let scheduled = state.scheduled.remove(&call);
        let failure = match scheduled {
            Some(failure) => Some(failure),
            None => state.failures.pop_front(),
        };
        match failure {
            None => Ok(()),
            Some(Failure::Transient) => Err(CurateError::Transient("injected".to_string())),
            Some(Failure::Terminal) => Err(CurateError::Remote {
                status: 403,
                message: "injected".to_string(),
            }),
        }
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn current_user(&self) -> Res<CurrentUser> {
        self.begin_call()?;
        Ok(CurrentUser {
            id: USER.to_string(),
            display_name: None,
        })
    }

    async fn current_user_playlists(
        &self,
        offset: u32,
        limit: u32,
    ) -> Res<Page<SimplifiedPlaylist>> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        state.playlist_pages += 1;
        let all: Vec<SimplifiedPlaylist> = state
            .playlists
            .iter()
            .map(|p| SimplifiedPlaylist {
                id: p.id.clone(),
                name: p.name.clone(),
                owner: Some(PlaylistOwner {
                    id: p.owner.clone(),
                }),
                public: Some(p.public),
            })
            .collect();
        Ok(page_of(&all, offset, limit))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("pl{}", state.next_id);
        state.playlists.push(FakePlaylist {
            id: id.clone(),
            name: name.to_string(),
            owner: user_id.to_string(),
            public,
            tracks: Vec::new(),
        });
        state.created.push(name.to_string());
        Ok(CreatePlaylistResponse {
            id,
            name: name.to_string(),
        })
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistItem>> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        state.item_pages += 1;
        let items: Vec<PlaylistItem> = state
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .map(|p| {
                p.tracks
                    .iter()
                    .map(|uri| PlaylistItem {
                        track: Some(TrackRef {
                            uri: Some(uri.clone()),
                        }),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(page_of(&items, offset, limit))
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        assert!(uris.len() <= 100, "add request with {} items", uris.len());
        state
            .add_calls
            .push((playlist_id.to_string(), uris.to_vec()));
        match state.playlists.iter_mut().find(|p| p.id == playlist_id) {
            Some(playlist) => {
                playlist.tracks.extend(uris.iter().cloned());
                Ok(())
            }
            None => Err(CurateError::Remote {
                status: 404,
                message: format!("no playlist {}", playlist_id),
            }),
        }
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Res<()> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        state.playlists.retain(|p| p.id != playlist_id);
        state.unfollowed.push(playlist_id.to_string());
        Ok(())
    }

    async fn saved_tracks(&self, offset: u32, limit: u32) -> Res<Page<SavedTrack>> {
        self.begin_call()?;
        let mut state = self.state.lock().unwrap();
        state.saved_pages += 1;
        Ok(page_of(&state.saved, offset, limit))
    }
}
