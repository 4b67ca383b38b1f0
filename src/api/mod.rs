//! Web API endpoints
//!
//! Every endpoint is a method on [`Client`](crate::Client), grouped here by
//! resource family. Methods take their required path parameters plus a slice
//! of [`RequestOption`](crate::options::RequestOption)s where the remote
//! accepts options.
//!
//! Full object variants carry their simplified variant as a flattened field,
//! so `full_artist.artist.name` reads the same data the simplified object has.

mod album;
mod artist;
mod category;
mod library;
mod playlist;
mod track;
mod user;

pub use album::{AlbumType, Copyright, FullAlbum, SimpleAlbum};
pub use artist::{FullArtist, SimpleArtist};
pub use category::Category;
pub use playlist::{
    FeaturedPlaylists, FullPlaylist, PlaylistChanges, PlaylistInfo, PlaylistReorderOptions,
    PlaylistTrack, PlaylistTracks, SimplePlaylist, TrackToRemove,
};
pub use track::{FullTrack, SavedTrack, SimpleTrack};
pub use user::User;

use crate::http::RequestConfig;
use crate::options::{process_options, RequestOption};

/// Request config carrying the query params for `opts`
fn with_options(opts: &[RequestOption]) -> RequestConfig {
    RequestConfig::new().params(process_options(opts))
}
