use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, ItemKey, TaggedFileExt};
use lofty::tag::Tag;

use crate::error::{CatalogError, Result};

use super::model::TagInfo;

/// Source of audio metadata for a file on disk.
///
/// Implementations may block; the synchronizer calls them without holding any
/// playlist lock.
pub trait TagReader: Send + Sync {
    fn read_tags(&self, path: &Path) -> Result<TagInfo>;
}

/// Reads tags and stream properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> Result<TagInfo> {
        let tagged = lofty::read_from_path(path).map_err(|e| CatalogError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let props = tagged.properties();
        let mut info = TagInfo {
            duration: props.duration(),
            bitrate: props
                .audio_bitrate()
                .or_else(|| props.overall_bitrate())
                .unwrap_or(0),
            channels: props.channels().unwrap_or(0),
            ..TagInfo::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            info.title = tag.title().map(|s| s.trim().to_string()).unwrap_or_default();
            info.artist = tag.artist().map(|s| s.trim().to_string()).unwrap_or_default();
            info.album = tag.album().map(|s| s.trim().to_string()).unwrap_or_default();
            info.genre = tag.genre().map(|s| s.trim().to_string()).unwrap_or_default();
            info.year = tag_year(tag);
        }

        Ok(info)
    }
}

/// Year from the recording date, else from a bare year field.
fn tag_year(tag: &Tag) -> u32 {
    [ItemKey::RecordingDate, ItemKey::Year]
        .iter()
        .find_map(|key| {
            tag.items()
                .filter(|item| item.key() == key)
                .find_map(|item| item.value().text().and_then(parse_year))
        })
        .unwrap_or(0)
}

/// Leading four-digit year of a date string such as `1999` or `1999-04-01`.
fn parse_year(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return None;
    }
    digits[..4].parse().ok()
}
