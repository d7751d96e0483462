use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::config::expand_user;
use crate::error::{CatalogError, Result};
use crate::library::{Playlist, PlaylistSummary, TrackMap};

use super::select::pick_from_catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RadioStats {
    pub playlists: usize,
    pub tracks: usize,
}

/// Serializable view of the whole radio.
#[derive(Debug, Clone, Serialize)]
pub struct RadioSummary {
    pub name: String,
    pub default_playlist: Option<PlaylistSummary>,
    pub creation_date: DateTime<Utc>,
    pub modification_date: DateTime<Utc>,
    pub stats: RadioStats,
}

/// Owns every playlist and the pointer to the default one.
///
/// Built once at startup and shared as `Arc<Catalog>` between the refresh
/// scheduler and whatever serves requests. Playlist names are not required to
/// be unique; lookups return the first match in list order.
#[derive(Debug)]
pub struct Catalog {
    name: String,
    creation_date: DateTime<Utc>,
    state: RwLock<CatalogState>,
}

#[derive(Debug)]
struct CatalogState {
    playlists: Vec<Arc<Playlist>>,
    // Always one of `playlists`: playlists are never removed.
    default_playlist: Option<Arc<Playlist>>,
    modification_date: DateTime<Utc>,
    stats: RadioStats,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            creation_date: now,
            state: RwLock::new(CatalogState {
                playlists: Vec::new(),
                default_playlist: None,
                modification_date: now,
                stats: RadioStats::default(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a static playlist.
    pub fn new_playlist(&self, name: &str) -> Arc<Playlist> {
        self.push(Playlist::new_static(name))
    }

    /// Append a playlist backed by `raw_path` once `$VARS` and `~/` are expanded.
    ///
    /// Nothing is appended when the path cannot be expanded.
    pub fn new_directory_playlist(&self, name: &str, raw_path: &str) -> Result<Arc<Playlist>> {
        let path = expand_user(raw_path)?;
        Ok(self.push(Playlist::new_directory(name, path)))
    }

    fn push(&self, playlist: Playlist) -> Arc<Playlist> {
        info!("New playlist {:?}", playlist.name());
        let playlist = Arc::new(playlist);
        let mut state = self.write();
        state.playlists.push(playlist.clone());
        state.stats.playlists += 1;
        playlist
    }

    /// Snapshot of the playlists in list order.
    pub fn playlists(&self) -> Vec<Arc<Playlist>> {
        self.read().playlists.clone()
    }

    pub fn list_playlists(&self) -> Vec<PlaylistSummary> {
        self.playlists().iter().map(|p| p.summary()).collect()
    }

    pub fn get_playlist(&self, name: &str) -> Result<Arc<Playlist>> {
        self.read()
            .playlists
            .iter()
            .find(|p| p.name() == name)
            .cloned()
            .ok_or_else(|| CatalogError::Lookup(name.to_string()))
    }

    pub fn default_playlist(&self) -> Option<Arc<Playlist>> {
        self.read().default_playlist.clone()
    }

    pub fn set_default_playlist(&self, name: &str) -> Result<Arc<Playlist>> {
        let playlist = self.get_playlist(name)?;
        let mut state = self.write();
        state.default_playlist = Some(playlist.clone());
        state.modification_date = Utc::now();
        info!("Default playlist is now {name:?}");
        Ok(playlist)
    }

    pub fn list_tracks(&self, name: &str) -> Result<TrackMap> {
        Ok(self.get_playlist(name)?.tracks())
    }

    /// Path of a random valid track, preferring the default playlist.
    pub fn next_track<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathBuf> {
        pick_from_catalog(self, rng).map(|t| t.path.clone())
    }

    /// Recompute the total track count from the playlists. Returns the new total.
    pub fn refresh_stats(&self) -> usize {
        let tracks = self.playlists().iter().map(|p| p.track_count()).sum();
        let mut state = self.write();
        state.stats.tracks = tracks;
        state.modification_date = Utc::now();
        tracks
    }

    pub fn stats(&self) -> RadioStats {
        self.read().stats
    }

    pub fn summary(&self) -> RadioSummary {
        let state = self.read();
        RadioSummary {
            name: self.name.clone(),
            default_playlist: state.default_playlist.as_ref().map(|p| p.summary()),
            creation_date: self.creation_date,
            modification_date: state.modification_date,
            stats: state.stats,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
