//! Paging object types

use crate::api::{Category, PlaylistTrack, SavedTrack, SimpleAlbum, SimplePlaylist, SimpleTrack};
use crate::error::Result;
use crate::types::null_as_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One fetched slice of a remote list, plus links to the adjacent slices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct Page<T> {
    /// Link to the Web API endpoint returning this page
    #[serde(default)]
    pub href: String,
    /// Items of this page, in remote order. Required, so a body that is
    /// not a paging object fails to decode instead of reading as empty.
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    /// Maximum number of items requested
    #[serde(default)]
    pub limit: u32,
    /// Index of the first item of this page within the full list
    #[serde(default)]
    pub offset: u32,
    /// Total number of items in the full list
    #[serde(default)]
    pub total: u32,
    /// Link to the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Link to the next page, if any
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            href: String::new(),
            items: Vec::new(),
            limit: 0,
            offset: 0,
            total: 0,
            previous: None,
            next: None,
        }
    }
}

/// Decode a page that may arrive wrapped in a resource key,
/// e.g. `{"categories": {...}}` or `{"message": "...", "playlists": {...}}`.
///
/// The wrapped page is the one object-valued field carrying `items`; scalar
/// siblings are ignored. Anything else is decoded as-is and so must be a
/// paging object itself.
pub(super) fn unwrap_page<T: DeserializeOwned>(value: Value) -> Result<Page<T>> {
    let value = match value {
        Value::Object(mut map) if !map.contains_key("items") => {
            let mut wrapped = map
                .iter()
                .filter(|(_, v)| v.get("items").is_some())
                .map(|(k, _)| k.clone());
            match (wrapped.next(), wrapped.next()) {
                (Some(key), None) => map.remove(&key).unwrap_or(Value::Null),
                _ => Value::Object(map),
            }
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Page of simplified albums
pub type SimpleAlbumPage = Page<SimpleAlbum>;

/// Page of simplified playlists
pub type SimplePlaylistPage = Page<SimplePlaylist>;

/// Page of simplified tracks
pub type SimpleTrackPage = Page<SimpleTrack>;

/// Page of playlist entries
pub type PlaylistTrackPage = Page<PlaylistTrack>;

/// Page of categories
pub type CategoryPage = Page<Category>;

/// Page of tracks saved in the user's library
pub type SavedTrackPage = Page<SavedTrack>;
