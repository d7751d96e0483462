use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::{PlaylistStatus, Track};

/// Tracks indexed by absolute path. Ordered so selection is reproducible.
pub type TrackMap = BTreeMap<PathBuf, Arc<Track>>;

/// A named collection of tracks.
///
/// A playlist with a backing directory is *dynamic* and gets refreshed by the
/// synchronizer; one without is *static* and only grows through
/// [`Playlist::insert_track`].
///
/// Everything that changes after construction sits behind one `RwLock`, taken
/// for a single insert or read at a time. Tracks are never evicted: a file
/// removed from disk keeps its entry until the process restarts.
#[derive(Debug)]
pub struct Playlist {
    name: String,
    path: Option<PathBuf>,
    creation_date: DateTime<Utc>,
    state: RwLock<PlaylistState>,
}

#[derive(Debug)]
struct PlaylistState {
    status: PlaylistStatus,
    modification_date: DateTime<Utc>,
    track_count: usize,
    tracks: TrackMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistStats {
    pub tracks: usize,
}

/// Serializable view of a playlist, without its tracks.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub path: String,
    pub creation_date: DateTime<Utc>,
    pub modification_date: DateTime<Utc>,
    pub status: PlaylistStatus,
    pub stats: PlaylistStats,
}

impl Playlist {
    fn with_path(name: impl Into<String>, path: Option<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            path,
            creation_date: now,
            state: RwLock::new(PlaylistState {
                status: PlaylistStatus::New,
                modification_date: now,
                track_count: 0,
                tracks: TrackMap::new(),
            }),
        }
    }

    /// A playlist without backing directory.
    pub fn new_static(name: impl Into<String>) -> Self {
        Self::with_path(name, None)
    }

    /// A playlist refreshed from `path`. An empty path yields a static playlist.
    pub fn new_directory(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        Self::with_path(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dynamic(&self) -> bool {
        self.path.is_some()
    }

    pub fn status(&self) -> PlaylistStatus {
        self.read().status
    }

    pub fn modification_date(&self) -> DateTime<Utc> {
        self.read().modification_date
    }

    /// Number of distinct paths ever inserted.
    pub fn track_count(&self) -> usize {
        self.read().track_count
    }

    pub fn get_track(&self, path: &Path) -> Option<Arc<Track>> {
        self.read().tracks.get(path).cloned()
    }

    /// Copy of the track index. Records are shared, not cloned.
    pub fn tracks(&self) -> TrackMap {
        self.read().tracks.clone()
    }

    /// Valid tracks in path order.
    pub fn valid_tracks(&self) -> Vec<Arc<Track>> {
        self.read()
            .tracks
            .values()
            .filter(|t| t.is_valid())
            .cloned()
            .collect()
    }

    /// Store `track` unless its path is already known, in which case the stored
    /// record is returned and `track` is dropped.
    pub fn insert_track(&self, track: Track) -> Arc<Track> {
        let mut state = self.write();
        if let Some(existing) = state.tracks.get(&track.path) {
            return existing.clone();
        }
        let track = Arc::new(track);
        state.tracks.insert(track.path.clone(), track.clone());
        state.track_count += 1;
        track
    }

    pub(crate) fn set_status(&self, status: PlaylistStatus) {
        self.write().status = status;
    }

    /// Close a sync pass: back to `Ready` and bump the modification date.
    pub(crate) fn mark_ready(&self) {
        let mut state = self.write();
        state.status = PlaylistStatus::Ready;
        state.modification_date = Utc::now();
    }

    pub fn summary(&self) -> PlaylistSummary {
        let state = self.read();
        PlaylistSummary {
            name: self.name.clone(),
            path: self
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            creation_date: self.creation_date,
            modification_date: state.modification_date,
            status: state.status,
            stats: PlaylistStats {
                tracks: state.track_count,
            },
        }
    }

    // Every mutation is a single insert or field store, so a poisoned lock
    // still guards a consistent state.
    fn read(&self) -> RwLockReadGuard<'_, PlaylistState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlaylistState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
