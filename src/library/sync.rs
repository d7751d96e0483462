use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CatalogError, Result};

use super::model::{PlaylistStatus, TagInfo, Track, display_title};
use super::playlist::Playlist;
use super::tags::TagReader;

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &[".git", "bower_components"];

/// File names never turned into tracks.
pub const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Outcome of one sync pass over a dynamic playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Track count after the pass.
    pub tracks: usize,
    /// Paths inserted during this pass.
    pub added: usize,
    /// Files that could not be stat'ed and will be retried next pass.
    pub failed: usize,
}

/// Walks the backing directory of a playlist and upserts what it finds.
#[derive(Clone)]
pub struct Synchronizer {
    reader: Arc<dyn TagReader>,
    follow_links: bool,
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

// Without link following, walkdir reports a symlink as itself; one that
// resolves to a regular file is still a track.
fn is_track_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_ignored_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| IGNORED_FILES.contains(&name))
        .unwrap_or(false)
}

impl Synchronizer {
    pub fn new(reader: Arc<dyn TagReader>) -> Self {
        Self {
            reader,
            follow_links: true,
        }
    }

    /// Whether symlinked directories are descended into during the walk.
    /// Symlinked files are upserted either way.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Refresh `playlist` from disk. Static playlists are left alone and yield `None`.
    ///
    /// Per-entry failures are logged and skipped; the pass always completes and
    /// leaves the playlist `Ready`.
    pub fn sync(&self, playlist: &Playlist) -> Option<SyncReport> {
        let Some(root) = playlist.path() else {
            debug!("Playlist {:?} is not dynamic, skipping update", playlist.name());
            return None;
        };

        info!("Updating playlist {:?}", playlist.name());
        playlist.set_status(PlaylistStatus::Updating);
        let before = playlist.track_count();
        let mut failed = 0;

        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("walker error: {e}");
                    continue;
                }
            };
            if !is_track_file(&entry) || is_ignored_file(entry.path()) {
                continue;
            }
            if let Err(e) = self.upsert_track(playlist, entry.path()) {
                warn!("Cannot add track to {:?}: {e}", playlist.name());
                failed += 1;
            }
        }

        playlist.mark_ready();
        let tracks = playlist.track_count();
        info!("Playlist {:?} updated, {tracks} tracks", playlist.name());

        Some(SyncReport {
            tracks,
            added: tracks - before,
            failed,
        })
    }

    /// Record the file at `path` in `playlist`, once.
    ///
    /// A known path returns the stored record without touching the disk. A
    /// failed stat inserts nothing, so the file is attempted again on the next
    /// pass. Unreadable tags do not fail the call: the track is stored with an
    /// empty tag and is never picked for playback.
    pub fn upsert_track(&self, playlist: &Playlist, path: &Path) -> Result<Arc<Track>> {
        if let Some(track) = playlist.get_track(path) {
            return Ok(track);
        }

        let stat = fs::metadata(path).map_err(|e| CatalogError::fs(path, e))?;

        let relative_path = playlist
            .path()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
            .to_path_buf();

        let tag = match self.reader.read_tags(path) {
            Ok(tag) => tag,
            Err(e) => {
                warn!("Failed to read tags of {path:?}: {e}");
                TagInfo::default()
            }
        };

        let now = Utc::now();
        let track = Track {
            title: display_title(path, &tag),
            path: path.to_path_buf(),
            relative_path,
            file_name: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_size: stat.len(),
            file_modification_time: DateTime::<Utc>::from(
                stat.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            ),
            creation_date: now,
            modification_date: now,
            tag,
        };

        Ok(playlist.insert_track(track))
    }
}
