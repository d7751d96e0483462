use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Settings;

use super::model::Catalog;

/// Build the startup catalog from `settings` and the process working directory.
pub fn bootstrap(settings: &Settings) -> Catalog {
    let cwd = match std::env::current_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            warn!("Cannot resolve working directory: {e}");
            None
        }
    };
    bootstrap_in(settings, cwd.as_deref())
}

/// Same as [`bootstrap`] with an explicit working directory.
///
/// Playlists that cannot be created are logged and left out; the catalog
/// itself is always returned.
pub fn bootstrap_in(settings: &Settings, cwd: Option<&Path>) -> Catalog {
    let catalog = Catalog::new(settings.radio.name.as_str());
    let boot = &settings.bootstrap;

    if !boot.manual_playlist.is_empty() {
        catalog.new_playlist(&boot.manual_playlist);
    }

    for entry in &boot.directory_playlists {
        add_directory_playlist(&catalog, &entry.name, &entry.path);
    }

    if boot.include_working_dir {
        if let Some(dir) = cwd {
            add_directory_playlist(&catalog, "local directory", &dir.to_string_lossy());
        }
    }

    for root in &boot.playlist_roots {
        let root = Path::new(root);
        let root = match cwd {
            _ if root.is_absolute() => root.to_path_buf(),
            Some(dir) => dir.join(root),
            None => continue,
        };
        for (name, dir) in discover_playlist_dirs(&root) {
            add_directory_playlist(
                &catalog,
                &format!("playlist: {name}"),
                &dir.to_string_lossy(),
            );
        }
    }

    let wanted = &settings.radio.default_playlist;
    if !wanted.is_empty() {
        if let Err(e) = catalog.set_default_playlist(wanted) {
            debug!("No default playlist: {e}");
        }
    }

    catalog
}

fn add_directory_playlist(catalog: &Catalog, name: &str, raw_path: &str) {
    if let Err(e) = catalog.new_directory_playlist(name, raw_path) {
        warn!("Playlist {name:?} not created: {e}");
    }
}

/// First-level entries of `root` that are, or link to, directories, sorted by name.
///
/// Only the first level is looked at; nested directories belong to the
/// playlist of their parent.
fn discover_playlist_dirs(root: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No playlists directory at {root:?}");
            return Vec::new();
        }
        Err(e) => {
            warn!("Cannot list playlists directory {root:?}: {e}");
            return Vec::new();
        }
    };

    let mut entries: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("walker error: {e}");
                None
            }
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        let real = if is_dir {
            path
        } else {
            match fs::canonicalize(&path) {
                Ok(real) => real,
                Err(e) => {
                    warn!("Cannot resolve symlink {path:?}: {e}");
                    continue;
                }
            }
        };

        match fs::metadata(&real) {
            Ok(meta) if meta.is_dir() => {
                found.push((entry.file_name().to_string_lossy().into_owned(), real));
            }
            Ok(_) => {}
            Err(e) => warn!("Cannot stat {real:?}: {e}"),
        }
    }
    found
}
