//! Albums

use super::artist::SimpleArtist;
use super::with_options;
use crate::client::Client;
use crate::error::{check_id_count, Result};
use crate::options::RequestOption;
use crate::pagination::{SimpleAlbumPage, SimpleTrackPage};
use crate::types::{join_ids, parse_date, ExternalUrls, Id, Image, Uri};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of album, used to filter an artist's albums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumType {
    /// Studio album
    Album,
    /// Single
    Single,
    /// Album the artist appears on
    AppearsOn,
    /// Compilation
    Compilation,
}

impl AlbumType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Single => "single",
            Self::AppearsOn => "appears_on",
            Self::Compilation => "compilation",
        }
    }
}

/// Basic info about an album
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleAlbum {
    /// Album name
    pub name: String,
    /// Spotify ID
    pub id: Id,
    /// Spotify URI
    pub uri: Uri,
    /// Album type as reported, e.g. "album" or "single"
    pub album_type: String,
    /// Relation of the album to the artist it was fetched through, if any
    pub album_group: Option<String>,
    /// Artists of the album
    pub artists: Vec<SimpleArtist>,
    /// Markets the album is available in (ISO 3166-1 alpha-2)
    pub available_markets: Vec<String>,
    /// Link to the endpoint with full details of the album
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Known external URLs
    pub external_urls: ExternalUrls,
    /// Cover art, widest first
    pub images: Vec<Image>,
    /// Release date, as precise as `release_date_precision` says
    pub release_date: String,
    /// One of "year", "month" or "day"
    pub release_date_precision: String,
    /// Number of tracks
    pub total_tracks: u32,
}

impl SimpleAlbum {
    /// Release date as a calendar date.
    ///
    /// Dates known only to the year or month resolve to the first day of
    /// that period. `None` when the remote sent nothing parseable.
    pub fn released_on(&self) -> Option<NaiveDate> {
        let padded = match self.release_date_precision.as_str() {
            "year" => format!("{}-01-01", self.release_date),
            "month" => format!("{}-01", self.release_date),
            _ => self.release_date.clone(),
        };
        parse_date(&padded).ok()
    }
}

/// Copyright statement of an album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Copyright {
    /// Copyright text
    pub text: String,
    /// "C" for copyright, "P" for performance copyright
    #[serde(rename = "type")]
    pub kind: String,
}

/// An album with label, popularity and its first page of tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullAlbum {
    /// The simplified album fields
    #[serde(flatten)]
    pub album: SimpleAlbum,
    /// Genres the album is associated with
    #[serde(default)]
    pub genres: Vec<String>,
    /// Popularity between 0 and 100
    #[serde(default)]
    pub popularity: u32,
    /// Record label
    #[serde(default)]
    pub label: String,
    /// Copyright statements
    #[serde(default)]
    pub copyrights: Vec<Copyright>,
    /// Known external IDs, e.g. "upc"
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
    /// First page of the album's tracks
    #[serde(default)]
    pub tracks: SimpleTrackPage,
}

#[derive(Deserialize)]
struct AlbumList {
    albums: Vec<Option<FullAlbum>>,
}

#[derive(Deserialize)]
struct AlbumsEnvelope {
    albums: SimpleAlbumPage,
}

impl Client {
    /// Catalog information for a single album
    ///
    /// Supported options: Market
    pub async fn get_album(&self, id: &Id, opts: &[RequestOption]) -> Result<FullAlbum> {
        let url = self.http().endpoint(&["albums", id.as_str()])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// Catalog information for up to 20 albums, `None` where not found
    ///
    /// Supported options: Market
    pub async fn get_albums(
        &self,
        ids: &[Id],
        opts: &[RequestOption],
    ) -> Result<Vec<Option<FullAlbum>>> {
        check_id_count(ids.len(), 1, 20)?;

        let url = self.http().endpoint(&["albums"])?;
        let config = with_options(opts).query("ids", join_ids(ids));
        let list: AlbumList = self.http().get_json_with_config(url, config).await?;
        Ok(list.albums)
    }

    /// Tracks of an album
    ///
    /// Supported options: Market, Limit, Offset
    pub async fn get_album_tracks(
        &self,
        id: &Id,
        opts: &[RequestOption],
    ) -> Result<SimpleTrackPage> {
        let url = self.http().endpoint(&["albums", id.as_str(), "tracks"])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// New album releases featured in Spotify
    ///
    /// Supported options: Country, Limit, Offset
    pub async fn new_releases(&self, opts: &[RequestOption]) -> Result<SimpleAlbumPage> {
        let url = self.http().endpoint(&["browse", "new-releases"])?;
        let body: AlbumsEnvelope = self
            .http()
            .get_json_with_config(url, with_options(opts))
            .await?;
        Ok(body.albums)
    }
}
