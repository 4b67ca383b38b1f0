//! CLI module
//!
//! Command-line access to a handful of endpoints.
//!
//! # Commands
//!
//! - `token` - Print the current access token
//! - `artist` - Show an artist
//! - `playlist` - Show a playlist
//! - `playlist-tracks` - List playlist entries, optionally across every page
//! - `categories` - List browse categories
//! - `new-releases` - List new album releases
//! - `library-contains` - Check tracks against the user's library

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
