//! Error types shared by the catalog, the synchronizer and the selector.

use std::path::PathBuf;

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A configured path could not be expanded.
    #[error("config error: {0}")]
    Config(String),

    /// Stat or directory enumeration failed for one entry.
    #[error("filesystem error on {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tag extraction failed. Non-fatal: the track is kept with an empty tag.
    #[error("cannot read tags from {path:?}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("no such playlist: {0:?}")]
    Lookup(String),

    #[error("there is no available track")]
    NoTrackAvailable,
}

impl CatalogError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
