use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::library::Synchronizer;

/// Keeps every dynamic playlist of a catalog in sync with the filesystem.
///
/// Sweeps are serial: playlists are synced one after the other in list
/// order, and the next sweep starts only after the pause that follows the
/// previous one.
pub struct Scheduler {
    catalog: Arc<Catalog>,
    synchronizer: Synchronizer,
    interval: Duration,
}

impl Scheduler {
    pub fn new(catalog: Arc<Catalog>, synchronizer: Synchronizer, interval: Duration) -> Self {
        Self {
            catalog,
            synchronizer,
            interval,
        }
    }

    /// Sync every dynamic playlist once, then refresh the catalog totals.
    /// Returns the total track count.
    pub fn sweep(&self) -> usize {
        let mut added = 0;
        let mut failed = 0;
        for playlist in self.catalog.playlists() {
            if !playlist.is_dynamic() {
                continue;
            }
            if let Some(report) = self.synchronizer.sync(&playlist) {
                debug!(
                    "Playlist {:?} is {:?} as of {}: +{} tracks, {} failed",
                    playlist.name(),
                    playlist.status(),
                    playlist.modification_date(),
                    report.added,
                    report.failed
                );
                added += report.added;
                failed += report.failed;
            }
        }
        let tracks = self.catalog.refresh_stats();
        info!(
            "Catalog {:?} refreshed, {tracks} tracks ({added} new, {failed} failed)",
            self.catalog.name()
        );
        tracks
    }

    /// Sweep, sleep, repeat. Never returns.
    pub fn run(&self) {
        loop {
            self.sweep();
            thread::sleep(self.interval);
        }
    }

    /// Run the scheduler on a dedicated thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("playlist-refresh".to_string())
            .spawn(move || self.run())
    }
}
