//! The current user's library ("Your Music")
//!
//! All ID-list calls accept 1 to 50 IDs and reject anything else before
//! sending a request.

use super::with_options;
use crate::client::Client;
use crate::error::{check_id_count, Result};
use crate::http::RequestConfig;
use crate::options::RequestOption;
use crate::pagination::SavedTrackPage;
use crate::types::{join_ids, Id};
use reqwest::Method;

const MAX_LIBRARY_IDS: usize = 50;

#[derive(Clone, Copy)]
enum Library {
    Tracks,
    Albums,
}

impl Library {
    fn segment(self) -> &'static str {
        match self {
            Self::Tracks => "tracks",
            Self::Albums => "albums",
        }
    }
}

impl Client {
    /// Whether each track is saved in the user's library, in input order
    pub async fn user_has_tracks(&self, ids: &[Id]) -> Result<Vec<bool>> {
        self.library_contains(Library::Tracks, ids).await
    }

    /// Whether each album is saved in the user's library, in input order
    pub async fn user_has_albums(&self, ids: &[Id]) -> Result<Vec<bool>> {
        self.library_contains(Library::Albums, ids).await
    }

    /// Save tracks to the user's library; duplicates are ignored remotely
    pub async fn add_tracks_to_library(&self, ids: &[Id]) -> Result<()> {
        self.modify_library(Library::Tracks, Method::PUT, ids).await
    }

    /// Remove tracks from the user's library
    pub async fn remove_tracks_from_library(&self, ids: &[Id]) -> Result<()> {
        self.modify_library(Library::Tracks, Method::DELETE, ids)
            .await
    }

    /// Save albums to the user's library
    pub async fn add_albums_to_library(&self, ids: &[Id]) -> Result<()> {
        self.modify_library(Library::Albums, Method::PUT, ids).await
    }

    /// Remove albums from the user's library
    pub async fn remove_albums_from_library(&self, ids: &[Id]) -> Result<()> {
        self.modify_library(Library::Albums, Method::DELETE, ids)
            .await
    }

    /// Tracks saved in the user's library, most recent first
    ///
    /// Supported options: Limit, Offset, Market
    pub async fn current_users_tracks(&self, opts: &[RequestOption]) -> Result<SavedTrackPage> {
        let url = self.http().endpoint(&["me", "tracks"])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    async fn library_contains(&self, library: Library, ids: &[Id]) -> Result<Vec<bool>> {
        check_id_count(ids.len(), 1, MAX_LIBRARY_IDS)?;

        let url = self
            .http()
            .endpoint(&["me", library.segment(), "contains"])?;
        let config = RequestConfig::new().query("ids", join_ids(ids));
        self.http().get_json_with_config(url, config).await
    }

    async fn modify_library(&self, library: Library, method: Method, ids: &[Id]) -> Result<()> {
        check_id_count(ids.len(), 1, MAX_LIBRARY_IDS)?;

        let url = self.http().endpoint(&["me", library.segment()])?;
        let config = RequestConfig::new().query("ids", join_ids(ids));
        self.http().request_empty(method, url, config).await
    }
}
