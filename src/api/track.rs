//! Tracks

use super::album::SimpleAlbum;
use super::artist::SimpleArtist;
use super::with_options;
use crate::client::Client;
use crate::error::{check_id_count, Result};
use crate::options::RequestOption;
use crate::types::{join_ids, parse_timestamp, ExternalUrls, Id, Uri};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Basic info about a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleTrack {
    /// Track name
    pub name: String,
    /// Spotify ID
    pub id: Id,
    /// Spotify URI
    pub uri: Uri,
    /// Artists who performed the track
    pub artists: Vec<SimpleArtist>,
    /// Markets the track is available in (ISO 3166-1 alpha-2)
    pub available_markets: Vec<String>,
    /// Disc number, usually 1
    pub disc_number: u32,
    /// Length of the track in milliseconds
    pub duration_ms: u64,
    /// Whether the track has explicit lyrics
    pub explicit: bool,
    /// Known external URLs
    pub external_urls: ExternalUrls,
    /// Link to the endpoint with full details of the track
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Link to a 30 second MP3 preview, if there is one
    pub preview_url: Option<String>,
    /// Position on its disc
    pub track_number: u32,
    /// Whether this is a local file rather than a catalog track
    pub is_local: bool,
}

impl SimpleTrack {
    /// Length of the track
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A track with its album and popularity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullTrack {
    /// The simplified track fields
    #[serde(flatten)]
    pub track: SimpleTrack,
    /// Album the track appears on
    #[serde(default)]
    pub album: SimpleAlbum,
    /// Popularity between 0 and 100
    #[serde(default)]
    pub popularity: u32,
    /// Known external IDs, e.g. "isrc"
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
}

/// A track saved in the current user's library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    /// When the track was saved, as sent by the remote
    #[serde(default)]
    pub added_at: String,
    /// The saved track
    pub track: FullTrack,
}

impl SavedTrack {
    /// When the track was saved
    pub fn saved_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.added_at)
    }
}

#[derive(Deserialize)]
struct TrackList {
    tracks: Vec<Option<FullTrack>>,
}

impl Client {
    /// Catalog information for a single track
    ///
    /// Supported options: Market
    pub async fn get_track(&self, id: &Id, opts: &[RequestOption]) -> Result<FullTrack> {
        let url = self.http().endpoint(&["tracks", id.as_str()])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// Catalog information for up to 50 tracks, `None` where not found
    ///
    /// Supported options: Market
    pub async fn get_tracks(
        &self,
        ids: &[Id],
        opts: &[RequestOption],
    ) -> Result<Vec<Option<FullTrack>>> {
        check_id_count(ids.len(), 1, 50)?;

        let url = self.http().endpoint(&["tracks"])?;
        let config = with_options(opts).query("ids", join_ids(ids));
        let list: TrackList = self.http().get_json_with_config(url, config).await?;
        Ok(list.tracks)
    }
}
