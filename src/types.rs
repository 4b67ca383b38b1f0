//! Common types used throughout the client
//!
//! Identifiers, small shared model objects, and the date/time layouts the
//! Web API uses for its string timestamps.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Layouts
// ============================================================================

/// Layout of plain date strings (e.g. a user's birthdate)
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Layout of ISO 8601 UTC timestamps (e.g. `added_at` on playlist tracks)
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a date string in [`DATE_LAYOUT`]
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_LAYOUT)
        .map_err(|e| Error::validation(format!("invalid date '{value}': {e}")))
}

/// Parse a timestamp string in [`TIMESTAMP_LAYOUT`]
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_LAYOUT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::validation(format!("invalid timestamp '{value}': {e}")))
}

// ============================================================================
// Identifiers
// ============================================================================

/// Base-62 identifier for an artist, track, album, etc.
///
/// It can be found at the end of a [`Uri`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl Id {
    /// Create a new ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifies an artist, album, track, or category.
///
/// For example, `spotify:track:6rqhFgbbKwnb9MLmUQDhG6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(pub String);

impl Uri {
    /// URI of a track
    pub fn track(id: &Id) -> Self {
        Self(format!("spotify:track:{id}"))
    }

    /// Borrow the raw URI
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join IDs into the comma-separated form used by `ids=` query params
pub(crate) fn join_ids(ids: &[Id]) -> String {
    ids.iter().map(Id::as_str).collect::<Vec<_>>().join(",")
}

/// Deserialize a field the Web API sometimes sends as `null` into its default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Shared Objects
// ============================================================================

/// Known external URLs for an object, keyed by type (e.g. "spotify")
pub type ExternalUrls = HashMap<String, String>;

/// Number of people following an artist or playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    /// The total number of followers
    #[serde(rename = "total", default)]
    pub count: u64,
    /// Link to full follower details, when available
    #[serde(rename = "href", default)]
    pub endpoint: Option<String>,
}

/// An image associated with an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image height in pixels
    #[serde(default)]
    pub height: Option<u32>,
    /// Image width in pixels
    #[serde(default)]
    pub width: Option<u32>,
    /// Source URL of the image
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date() {
        let date = parse_date("1984-07-21").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1984, 7, 21));
        assert!(parse_date("21/07/1984").is_err());
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2014-09-01T04:21:28Z").unwrap();
        assert_eq!(ts.year(), 2014);
        assert_eq!(ts.hour(), 4);
        assert_eq!(ts.second(), 28);
        assert!(parse_timestamp("2014-09-01 04:21:28").is_err());
    }

    #[test]
    fn test_track_uri() {
        let id = Id::new("6rqhFgbbKwnb9MLmUQDhG6");
        assert_eq!(
            Uri::track(&id).as_str(),
            "spotify:track:6rqhFgbbKwnb9MLmUQDhG6"
        );
    }

    #[test]
    fn test_join_ids() {
        let ids = vec![Id::from("a"), Id::from("b"), Id::from("c")];
        assert_eq!(join_ids(&ids), "a,b,c");
    }

    #[test]
    fn test_followers_and_image_deserialize() {
        let followers: Followers =
            serde_json::from_str(r#"{"href": null, "total": 1234}"#).unwrap();
        assert_eq!(followers.count, 1234);
        assert!(followers.endpoint.is_none());

        let image: Image =
            serde_json::from_str(r#"{"height": 640, "width": 640, "url": "https://i.scdn.co/x"}"#)
                .unwrap();
        assert_eq!(image.height, Some(640));
    }
}
