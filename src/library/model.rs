use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lowest tag bitrate (kbps) a track needs to be picked for playback.
pub const MIN_PLAYABLE_BITRATE: u32 = 64;

/// Metadata read from the audio file itself.
///
/// A file whose tags could not be read keeps `TagInfo::default()`, which has
/// a zero bitrate and therefore marks the track as unplayable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    pub duration: Duration,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Audio bitrate in kbps.
    pub bitrate: u32,
    pub year: u32,
    pub channels: u8,
}

/// Snapshot of one file as seen by the synchronizer. Never mutated once stored.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub title: String,
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub file_modification_time: DateTime<Utc>,
    pub creation_date: DateTime<Utc>,
    pub modification_date: DateTime<Utc>,
    pub tag: TagInfo,
}

impl Track {
    pub fn is_valid(&self) -> bool {
        self.tag.bitrate >= MIN_PLAYABLE_BITRATE
    }
}

/// Title shown for a track: the tag title when present, else the file stem.
pub(crate) fn display_title(path: &Path, tag: &TagInfo) -> String {
    let title = tag.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum PlaylistStatus {
    New,
    Updating,
    Ready,
}

impl Default for PlaylistStatus {
    fn default() -> Self {
        Self::New
    }
}
