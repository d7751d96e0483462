//! Track and playlist model, tag extraction and directory synchronization.
//!
//! A [`Playlist`] owns its tracks keyed by absolute path. The
//! [`Synchronizer`] fills dynamic playlists from their backing directory,
//! reading metadata through a [`TagReader`].

mod model;
mod playlist;
mod sync;
mod tags;

pub use model::*;
pub use playlist::*;
pub use sync::*;
pub use tags::*;
