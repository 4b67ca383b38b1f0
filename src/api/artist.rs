//! Artists

use super::album::AlbumType;
use super::track::FullTrack;
use super::with_options;
use crate::client::Client;
use crate::error::{check_id_count, Result};
use crate::http::RequestConfig;
use crate::options::RequestOption;
use crate::pagination::SimpleAlbumPage;
use crate::types::{join_ids, ExternalUrls, Followers, Id, Image, Uri};
use serde::{Deserialize, Serialize};

/// Basic info about an artist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleArtist {
    /// Artist name
    pub name: String,
    /// Spotify ID
    pub id: Id,
    /// Spotify URI
    pub uri: Uri,
    /// Link to the endpoint with full details of the artist
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Known external URLs
    pub external_urls: ExternalUrls,
}

/// An artist with popularity, genres, followers and images
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullArtist {
    /// The simplified artist fields
    #[serde(flatten)]
    pub artist: SimpleArtist,
    /// Popularity between 0 and 100, derived from the artist's tracks
    #[serde(default)]
    pub popularity: u32,
    /// Genres the artist is associated with; empty if not yet classified
    #[serde(default)]
    pub genres: Vec<String>,
    /// Follower info
    #[serde(default)]
    pub followers: Followers,
    /// Artist images, widest first
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Deserialize)]
struct ArtistList<T> {
    artists: Vec<T>,
}

#[derive(Deserialize)]
struct TrackList {
    tracks: Vec<FullTrack>,
}

impl Client {
    /// Catalog information for a single artist
    pub async fn get_artist(&self, id: &Id) -> Result<FullArtist> {
        let url = self.http().endpoint(&["artists", id.as_str()])?;
        self.http().get_json(url).await
    }

    /// Catalog information for up to 50 artists.
    ///
    /// Results follow the order of `ids`; an artist that was not found is
    /// `None` at its position. Duplicate IDs give duplicate results.
    pub async fn get_artists(&self, ids: &[Id]) -> Result<Vec<Option<FullArtist>>> {
        check_id_count(ids.len(), 1, 50)?;

        let url = self.http().endpoint(&["artists"])?;
        let config = RequestConfig::new().query("ids", join_ids(ids));
        let list: ArtistList<Option<FullArtist>> =
            self.http().get_json_with_config(url, config).await?;
        Ok(list.artists)
    }

    /// An artist's top tracks in a country (ISO 3166-1 alpha-2), at most 10
    pub async fn get_artist_top_tracks(&self, id: &Id, country: &str) -> Result<Vec<FullTrack>> {
        let url = self
            .http()
            .endpoint(&["artists", id.as_str(), "top-tracks"])?;
        let config = RequestConfig::new().query("country", country);
        let list: TrackList = self.http().get_json_with_config(url, config).await?;
        Ok(list.tracks)
    }

    /// Up to 20 artists similar to the given one
    pub async fn get_related_artists(&self, id: &Id) -> Result<Vec<FullArtist>> {
        let url = self
            .http()
            .endpoint(&["artists", id.as_str(), "related-artists"])?;
        let list: ArtistList<FullArtist> = self.http().get_json(url).await?;
        Ok(list.artists)
    }

    /// An artist's albums, optionally restricted to some album types.
    ///
    /// Without a market the remote tends to return one copy of each album
    /// per market it is available in.
    ///
    /// Supported options: Market, Limit, Offset
    pub async fn get_artist_albums(
        &self,
        id: &Id,
        types: &[AlbumType],
        opts: &[RequestOption],
    ) -> Result<SimpleAlbumPage> {
        let url = self.http().endpoint(&["artists", id.as_str(), "albums"])?;
        let mut config = with_options(opts);
        if !types.is_empty() {
            let groups: Vec<&str> = types.iter().map(AlbumType::as_str).collect();
            config = config.query("include_groups", groups.join(","));
        }
        self.http().get_json_with_config(url, config).await
    }
}
