use serde::{Deserialize, Serialize};

/// Top-level daemon settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/radioman/config.toml` or `~/.config/radioman/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RADIOMAN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub radio: RadioSettings,
    pub library: LibrarySettings,
    pub bootstrap: BootstrapSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RadioSettings {
    /// Name reported by the radio summary.
    pub name: String,
    /// Playlist made default at startup, if one with that name exists.
    pub default_playlist: String,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            name: "RadioMan".to_string(),
            default_playlist: "iTunes Music".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Pause between two refresh sweeps (seconds).
    pub refresh_interval_secs: u64,
    /// Whether to descend into symlinked directories. Symlinked files are
    /// always picked up.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5 * 60,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryPlaylist {
    pub name: String,
    /// Raw path; `$VARS` and a leading `~/` are expanded.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapSettings {
    /// Name of the static playlist filled by hand. Empty disables it.
    pub manual_playlist: String,
    /// Directory playlists created in this order.
    pub directory_playlists: Vec<DirectoryPlaylist>,
    /// Add a "local directory" playlist for the working directory.
    pub include_working_dir: bool,
    /// Roots whose first-level directories each become a playlist.
    /// Relative roots are resolved against the working directory.
    pub playlist_roots: Vec<String>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            manual_playlist: "manual".to_string(),
            directory_playlists: vec![
                DirectoryPlaylist {
                    name: "iTunes Music".to_string(),
                    path: "~/Music/iTunes/iTunes Media/Music/".to_string(),
                },
                DirectoryPlaylist {
                    name: "iTunes Podcasts".to_string(),
                    path: "~/Music/iTunes/iTunes Media/Podcasts/".to_string(),
                },
            ],
            include_working_dir: true,
            playlist_roots: vec!["/playlists".to_string(), "playlists".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
