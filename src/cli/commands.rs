//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spotify Web API client
#[derive(Parser, Debug)]
#[command(name = "spotify-web")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client settings file (YAML); falls back to SPOTIFY_TOKEN or SPOTIFY_ID/SPOTIFY_SECRET
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the current access token
    Token,

    /// Show an artist
    Artist {
        /// Artist ID
        id: String,
    },

    /// Show a playlist
    Playlist {
        /// Playlist ID
        id: String,

        /// Market (ISO 3166-1 alpha-2)
        #[arg(long)]
        market: Option<String>,
    },

    /// List the entries of a playlist
    PlaylistTracks {
        /// Playlist ID
        id: String,

        /// Entries per page
        #[arg(long)]
        limit: Option<u32>,

        /// Follow next links until the last page
        #[arg(long)]
        all: bool,
    },

    /// List browse categories
    Categories {
        /// Country (ISO 3166-1 alpha-2)
        #[arg(long)]
        country: Option<String>,

        /// Locale, e.g. sv_SE
        #[arg(long)]
        locale: Option<String>,

        /// Categories per page
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List new album releases
    NewReleases {
        /// Country (ISO 3166-1 alpha-2)
        #[arg(long)]
        country: Option<String>,

        /// Albums per page
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Check whether tracks are saved in the user's library
    LibraryContains {
        /// Track IDs (1 to 50)
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one value per line
    Json,
    /// Indented JSON
    Pretty,
}
