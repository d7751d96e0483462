use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "radioman")]
#[command(about = "Filesystem-backed radio catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// The requested command; `serve` when none was given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Keep the catalog in sync forever
    Serve,
    /// Print the path of the next track to play
    Next,
    /// Print playlist summaries as JSON
    List,
    /// Print the tracks of one playlist as JSON
    Tracks {
        /// Playlist name, e.g. "playlist: rock"
        name: String,
    },
    /// Print the radio summary as JSON
    Radio,
    /// Print the effective configuration as TOML
    Config,
}
