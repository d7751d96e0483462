//! Configuration loader, schema types and path expansion.
//!
//! This module exposes the configuration schema used to build the catalog
//! and drive the refresh scheduler, plus helpers to load it from disk.

mod expand;
mod load;
mod schema;

pub use expand::expand_user;
pub use schema::*;

#[cfg(test)]
mod tests;
