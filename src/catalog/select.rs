use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::library::{Playlist, Track};

use super::model::Catalog;

/// Uniformly random valid track of `playlist`.
///
/// Valid tracks are drawn from in path order, so a seeded `rng` always yields
/// the same pick for the same playlist contents.
pub fn pick_random<R: Rng + ?Sized>(playlist: &Playlist, rng: &mut R) -> Result<Arc<Track>> {
    let valid = playlist.valid_tracks();
    if valid.is_empty() {
        return Err(CatalogError::NoTrackAvailable);
    }
    let i = rng.random_range(0..valid.len());
    Ok(valid[i].clone())
}

/// Random track from the default playlist, else from the first playlist in
/// list order that has a valid track.
pub fn pick_from_catalog<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Arc<Track>> {
    let default = catalog.default_playlist();
    if let Some(playlist) = &default {
        match pick_random(playlist, &mut *rng) {
            Ok(track) => return Ok(track),
            Err(e) => debug!("Default playlist {:?}: {e}", playlist.name()),
        }
    }

    for playlist in catalog.playlists() {
        if default.as_ref().is_some_and(|d| Arc::ptr_eq(d, &playlist)) {
            continue;
        }
        if let Ok(track) = pick_random(&playlist, &mut *rng) {
            return Ok(track);
        }
    }

    Err(CatalogError::NoTrackAvailable)
}
