//! Users

use crate::client::Client;
use crate::error::Result;
use crate::types::{null_as_default, ExternalUrls, Followers, Image, Uri};
use serde::{Deserialize, Serialize};

/// Public profile of a Spotify user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Name displayed on the profile, if set
    pub display_name: Option<String>,
    /// Known external URLs
    pub external_urls: ExternalUrls,
    /// Follower info
    pub followers: Followers,
    /// Link to the endpoint with the user's profile
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Spotify user ID; not a base-62 ID
    pub id: String,
    /// Profile images
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    /// Spotify URI
    pub uri: Uri,
}

impl Client {
    /// Public profile of a user
    pub async fn get_users_public_profile(&self, user_id: &str) -> Result<User> {
        let url = self.http().endpoint(&["users", user_id])?;
        self.http().get_json(url).await
    }
}
