//! Playlists

use super::track::FullTrack;
use super::user::User;
use super::with_options;
use crate::client::Client;
use crate::error::{check_id_count, Result};
use crate::http::RequestConfig;
use crate::options::RequestOption;
use crate::pagination::{PlaylistTrackPage, SimplePlaylistPage};
use crate::types::{null_as_default, ExternalUrls, Followers, Id, Image, Uri};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Most tracks a single add or replace call accepts
const MAX_PLAYLIST_TRACKS: usize = 100;

/// Most users a single follow check accepts
const MAX_FOLLOW_CHECK_USERS: usize = 5;

/// Where the tracks of a simplified playlist can be fetched, and how many
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTracks {
    /// Link to the playlist's tracks
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Number of tracks in the playlist
    pub total: u32,
}

/// Fields shared by simplified and full playlists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistInfo {
    /// Whether the owner lets others modify the playlist
    pub collaborative: bool,
    /// Known external URLs
    pub external_urls: ExternalUrls,
    /// Link to the endpoint with full details of the playlist
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Spotify ID
    pub id: Id,
    /// Playlist images; the URLs are temporary
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    /// Playlist name
    pub name: String,
    /// Owner of the playlist
    pub owner: User,
    /// Public/private status, when known
    #[serde(rename = "public")]
    pub is_public: Option<bool>,
    /// Version identifier of the playlist contents
    pub snapshot_id: String,
    /// Spotify URI
    pub uri: Uri,
}

/// Basic info about a playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplePlaylist {
    /// Shared playlist fields
    #[serde(flatten)]
    pub info: PlaylistInfo,
    /// Link to and count of the playlist's tracks
    #[serde(default)]
    pub tracks: PlaylistTracks,
}

/// A playlist with description, followers and its first page of tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullPlaylist {
    /// Shared playlist fields
    #[serde(flatten)]
    pub info: PlaylistInfo,
    /// Playlist description
    #[serde(default)]
    pub description: Option<String>,
    /// Follower info
    #[serde(default)]
    pub followers: Followers,
    /// First page of the playlist's tracks
    #[serde(default)]
    pub tracks: PlaylistTrackPage,
}

/// One entry of a playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTrack {
    /// When the track was added, as sent by the remote; empty for very old playlists
    pub added_at: String,
    /// Who added the track, if known
    pub added_by: Option<User>,
    /// Whether the entry is a local file
    pub is_local: bool,
    /// The track; `None` when it is no longer available
    pub track: Option<FullTrack>,
}

/// Playlists featured by Spotify, with the accompanying headline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPlaylists {
    /// Headline such as "Monday morning music, coming right up!"
    #[serde(default)]
    pub message: String,
    /// The featured playlists
    pub playlists: SimplePlaylistPage,
}

/// A track to remove from a playlist at specific 0-based positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackToRemove {
    /// Track URI
    pub uri: String,
    /// Positions of the occurrences to remove
    pub positions: Vec<u32>,
}

impl TrackToRemove {
    /// Remove `track` at the given positions
    pub fn new(track: &Id, positions: Vec<u32>) -> Self {
        Self {
            uri: Uri::track(track).to_string(),
            positions,
        }
    }
}

/// Moves a range of tracks within a playlist.
///
/// In a playlist of 10 tracks, `range_start: 0, insert_before: 10` moves the
/// first track to the end, and `range_start: 8, range_length: Some(2),
/// insert_before: 0` moves the last two to the front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistReorderOptions {
    /// Position of the first track to move
    pub range_start: u32,
    /// Number of tracks to move; the remote assumes 1 when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_length: Option<u32>,
    /// Position the tracks are moved in front of
    pub insert_before: u32,
    /// Snapshot the change applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

/// Playlist details to change; unset fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistChanges {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New public/private status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct Snapshot {
    snapshot_id: String,
}

fn track_uris(ids: &[Id]) -> Vec<String> {
    ids.iter().map(|id| Uri::track(id).to_string()).collect()
}

impl Client {
    /// Playlists featured by Spotify
    ///
    /// Supported options: Locale, Country, Timestamp, Limit, Offset
    pub async fn featured_playlists(&self, opts: &[RequestOption]) -> Result<FeaturedPlaylists> {
        let url = self.http().endpoint(&["browse", "featured-playlists"])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// Follow a playlist, publicly or privately
    pub async fn follow_playlist(&self, playlist: &Id, public: bool) -> Result<()> {
        let url = self
            .http()
            .endpoint(&["playlists", playlist.as_str(), "followers"])?;
        let config = RequestConfig::new().json(json!({ "public": public }));
        self.http().request_empty(Method::PUT, url, config).await
    }

    /// Stop following a playlist
    pub async fn unfollow_playlist(&self, playlist: &Id) -> Result<()> {
        let url = self
            .http()
            .endpoint(&["playlists", playlist.as_str(), "followers"])?;
        self.http()
            .request_empty(Method::DELETE, url, RequestConfig::new())
            .await
    }

    /// Playlists owned or followed by a user
    ///
    /// Supported options: Limit, Offset
    pub async fn get_playlists_for_user(
        &self,
        user_id: &str,
        opts: &[RequestOption],
    ) -> Result<SimplePlaylistPage> {
        let url = self.http().endpoint(&["users", user_id, "playlists"])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// A playlist with its first page of tracks
    ///
    /// Supported options: Fields, Market
    pub async fn get_playlist(&self, id: &Id, opts: &[RequestOption]) -> Result<FullPlaylist> {
        let url = self.http().endpoint(&["playlists", id.as_str()])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// The entries of a playlist
    ///
    /// Supported options: Limit, Offset, Market, Fields
    pub async fn get_playlist_tracks(
        &self,
        id: &Id,
        opts: &[RequestOption],
    ) -> Result<PlaylistTrackPage> {
        let url = self.http().endpoint(&["playlists", id.as_str(), "tracks"])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// Create an empty playlist for a user
    pub async fn create_playlist_for_user(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
        collaborative: bool,
    ) -> Result<FullPlaylist> {
        let url = self.http().endpoint(&["users", user_id, "playlists"])?;
        let body = json!({
            "name": name,
            "public": public,
            "description": description,
            "collaborative": collaborative,
        });
        self.http()
            .request_json(Method::POST, url, RequestConfig::new().json(body))
            .await
    }

    /// Change any of a playlist's name, public status and description
    pub async fn modify_playlist(&self, id: &Id, changes: &PlaylistChanges) -> Result<()> {
        let url = self.http().endpoint(&["playlists", id.as_str()])?;
        let config = RequestConfig::new().json(serde_json::to_value(changes)?);
        self.http().request_empty(Method::PUT, url, config).await
    }

    /// Rename a playlist
    pub async fn change_playlist_name(&self, id: &Id, name: &str) -> Result<()> {
        let changes = PlaylistChanges {
            name: Some(name.to_string()),
            ..PlaylistChanges::default()
        };
        self.modify_playlist(id, &changes).await
    }

    /// Make a playlist public or private
    pub async fn change_playlist_access(&self, id: &Id, public: bool) -> Result<()> {
        let changes = PlaylistChanges {
            public: Some(public),
            ..PlaylistChanges::default()
        };
        self.modify_playlist(id, &changes).await
    }

    /// Replace a playlist's description
    pub async fn change_playlist_description(&self, id: &Id, description: &str) -> Result<()> {
        let changes = PlaylistChanges {
            description: Some(description.to_string()),
            ..PlaylistChanges::default()
        };
        self.modify_playlist(id, &changes).await
    }

    /// Rename a playlist and set its public status in one call
    pub async fn change_playlist_name_and_access(
        &self,
        id: &Id,
        name: &str,
        public: bool,
    ) -> Result<()> {
        let changes = PlaylistChanges {
            name: Some(name.to_string()),
            public: Some(public),
            description: None,
        };
        self.modify_playlist(id, &changes).await
    }

    /// Set name, public status and description in one call
    pub async fn change_playlist_name_access_and_description(
        &self,
        id: &Id,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<()> {
        let changes = PlaylistChanges {
            name: Some(name.to_string()),
            public: Some(public),
            description: Some(description.to_string()),
        };
        self.modify_playlist(id, &changes).await
    }

    /// Append up to 100 tracks, returning the new snapshot ID
    pub async fn add_tracks_to_playlist(&self, id: &Id, tracks: &[Id]) -> Result<String> {
        check_id_count(tracks.len(), 1, MAX_PLAYLIST_TRACKS)?;

        let url = self.http().endpoint(&["playlists", id.as_str(), "tracks"])?;
        let config = RequestConfig::new().json(json!({ "uris": track_uris(tracks) }));
        let snapshot: Snapshot = self.http().request_json(Method::POST, url, config).await?;
        Ok(snapshot.snapshot_id)
    }

    /// Remove every occurrence of the given tracks, returning the new snapshot ID
    pub async fn remove_tracks_from_playlist(&self, id: &Id, tracks: &[Id]) -> Result<String> {
        let tracks: Vec<Value> = track_uris(tracks)
            .into_iter()
            .map(|uri| json!({ "uri": uri }))
            .collect();
        self.remove_playlist_entries(id, json!({ "tracks": tracks }))
            .await
    }

    /// Remove tracks at specific positions, optionally against a snapshot.
    ///
    /// If any track is not found at its position the whole call fails and
    /// nothing is removed.
    pub async fn remove_tracks_from_playlist_opt(
        &self,
        id: &Id,
        tracks: &[TrackToRemove],
        snapshot_id: Option<&str>,
    ) -> Result<String> {
        let mut body = json!({ "tracks": tracks });
        if let Some(snapshot_id) = snapshot_id {
            body["snapshot_id"] = Value::from(snapshot_id);
        }
        self.remove_playlist_entries(id, body).await
    }

    async fn remove_playlist_entries(&self, id: &Id, body: Value) -> Result<String> {
        let url = self.http().endpoint(&["playlists", id.as_str(), "tracks"])?;
        let config = RequestConfig::new().json(body);
        let snapshot: Snapshot = self
            .http()
            .request_json(Method::DELETE, url, config)
            .await?;
        Ok(snapshot.snapshot_id)
    }

    /// Overwrite a playlist with up to 100 tracks; an empty slice clears it
    pub async fn replace_playlist_tracks(&self, id: &Id, tracks: &[Id]) -> Result<()> {
        check_id_count(tracks.len(), 0, MAX_PLAYLIST_TRACKS)?;

        let url = self.http().endpoint(&["playlists", id.as_str(), "tracks"])?;
        let config = RequestConfig::new().json(json!({ "uris": track_uris(tracks) }));
        self.http().request_empty(Method::PUT, url, config).await
    }

    /// Whether each of up to 5 users follows a playlist, in input order
    pub async fn user_follows_playlist(&self, id: &Id, user_ids: &[&str]) -> Result<Vec<bool>> {
        check_id_count(user_ids.len(), 1, MAX_FOLLOW_CHECK_USERS)?;

        let url = self
            .http()
            .endpoint(&["playlists", id.as_str(), "followers", "contains"])?;
        let config = RequestConfig::new().query("ids", user_ids.join(","));
        self.http().get_json_with_config(url, config).await
    }

    /// Move a range of tracks, returning the new snapshot ID
    pub async fn reorder_playlist_tracks(
        &self,
        id: &Id,
        options: &PlaylistReorderOptions,
    ) -> Result<String> {
        let url = self.http().endpoint(&["playlists", id.as_str(), "tracks"])?;
        let config = RequestConfig::new().json(serde_json::to_value(options)?);
        let snapshot: Snapshot = self.http().request_json(Method::PUT, url, config).await?;
        Ok(snapshot.snapshot_id)
    }

    /// Replace the playlist's cover with a JPEG image
    pub async fn set_playlist_image(&self, id: &Id, jpeg: &[u8]) -> Result<()> {
        let url = self.http().endpoint(&["playlists", id.as_str(), "images"])?;
        let encoded = STANDARD.encode(jpeg);
        let config = RequestConfig::new().bytes("image/jpeg", encoded.into_bytes());
        self.http().request_empty(Method::PUT, url, config).await
    }
}
