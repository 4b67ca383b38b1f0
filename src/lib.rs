// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # spotify-web
//!
//! A typed async client for the Spotify Web API.
//!
//! ## Features
//!
//! - **Rate-limit retry**: 429 responses are waited out using `Retry-After`
//! - **Structured errors**: every failed response becomes an [`ApiError`]
//! - **Pagination**: follow `next`/`previous` links, or stream every page
//! - **Token sources**: bearer token, client credentials or refresh token
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spotify_web::{AuthConfig, Client, Id};
//! use spotify_web::options::limit;
//!
//! #[tokio::main]
//! async fn main() -> spotify_web::Result<()> {
//!     let client = Client::new(AuthConfig::client_credentials("id", "secret"))?;
//!
//!     let mut page = client
//!         .get_playlist_tracks(&Id::new("57qttz6pK881sjxj2TAEEo"), &[limit(50)])
//!         .await?;
//!     loop {
//!         println!("{} entries", page.items.len());
//!         match client.next_page(&page).await {
//!             Ok(next) => page = next,
//!             Err(spotify_web::Error::NoMorePages) => break,
//!             Err(e) => return Err(e),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Client (artist, album, track, playlist, ...)     │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────────────┴───────┬───────────────────────┐
//! │   Auth   │        HTTP              │     Pagination        │
//! ├──────────┼──────────────────────────┼───────────────────────┤
//! │ Bearer   │ Shared 429 pause         │ next_page             │
//! │ Client   │ Retry-After resubmit     │ previous_page         │
//! │  creds   │ Error decoding           │ pages() stream        │
//! │ Refresh  │                          │                       │
//! └──────────┴──────────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Shared model types
pub mod types;

/// Request options
pub mod options;

/// Token sources
pub mod auth;

/// HTTP transport with retry and error decoding
pub mod http;

/// Paging objects and traversal
pub mod pagination;

/// Endpoint families
pub mod api;

/// Client entry point
pub mod client;

/// Client settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::*;
pub use auth::{AuthConfig, CachedToken};
pub use client::{Client, ClientBuilder};
pub use config::ClientSettings;
pub use error::{ApiError, Error, Result};
pub use options::RequestOption;
pub use pagination::*;
pub use types::{ExternalUrls, Followers, Id, Image, Uri};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
