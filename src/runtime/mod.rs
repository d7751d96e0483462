use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use crate::catalog::{Catalog, bootstrap};
use crate::library::{LoftyTagReader, Synchronizer, Track};

mod commands;
mod logging;
mod scheduler;
mod settings;

pub use commands::{Cli, Command};
pub use scheduler::Scheduler;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.log.filter);

    let command = Cli::parse().into_command();
    if command == Command::Config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let catalog = Arc::new(bootstrap(&settings));
    let synchronizer =
        Synchronizer::new(Arc::new(LoftyTagReader)).follow_links(settings.library.follow_links);
    let interval = Duration::from_secs(settings.library.refresh_interval_secs);
    let scheduler = Scheduler::new(catalog.clone(), synchronizer, interval);

    if command == Command::Serve {
        info!(
            "Serving {:?} with {} playlists, refreshing every {interval:?}",
            catalog.name(),
            catalog.stats().playlists
        );
        let handle = scheduler.spawn()?;
        handle.join().map_err(|_| "playlist refresh thread panicked")?;
        return Ok(());
    }

    // One-shot commands answer from a freshly synced catalog.
    scheduler.sweep();
    answer(&catalog, &command)
}

fn answer(catalog: &Catalog, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Next => match catalog.next_track(&mut rand::rng()) {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                error!("cannot get a random song, are your playlists empty?");
                return Err(e.into());
            }
        },
        Command::List => {
            println!("{}", serde_json::to_string_pretty(&catalog.list_playlists())?);
        }
        Command::Tracks { name } => {
            let tracks = catalog.list_tracks(name)?;
            let tracks: BTreeMap<String, &Track> = tracks
                .iter()
                .map(|(path, track)| (path.display().to_string(), track.as_ref()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        Command::Radio => {
            println!("{}", serde_json::to_string_pretty(&catalog.summary())?);
        }
        Command::Serve | Command::Config => {}
    }
    Ok(())
}
