//! Pagination module
//!
//! # Overview
//!
//! List endpoints return one [`Page`] of a larger remote list together with
//! links to the adjacent pages. Traversal is driven entirely by those links:
//! the page value carries all the state needed to continue, so a page that
//! was serialized and restored later can be advanced just the same.
//!
//! - [`Client::next_page`](crate::Client::next_page) / [`Client::previous_page`](crate::Client::previous_page)
//!   fetch one adjacent page, or fail with `Error::NoMorePages` without I/O
//! - [`Client::pages`](crate::Client::pages) turns a first page into a stream
//!   that fetches each following page only when polled

mod cursor;
mod types;

pub use types::{
    CategoryPage, Page, PlaylistTrackPage, SavedTrackPage, SimpleAlbumPage, SimplePlaylistPage,
    SimpleTrackPage,
};

#[cfg(test)]
mod tests;
