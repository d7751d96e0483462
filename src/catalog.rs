//! The radio catalog: ordered playlists, the default playlist and the
//! random track selector used to choose what plays next.

mod model;
mod select;
mod startup;

pub use model::*;
#[cfg(test)]
pub use select::*;
pub use startup::*;
