//! Browse categories

use super::with_options;
use crate::client::Client;
use crate::error::Result;
use crate::options::RequestOption;
use crate::pagination::{CategoryPage, SimplePlaylistPage};
use crate::types::Image;
use serde::{Deserialize, Serialize};

/// A tag used to organize items, e.g. on the "Browse" tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Link to the endpoint with full details of the category
    #[serde(rename = "href")]
    pub endpoint: String,
    /// Category icon in various sizes
    pub icons: Vec<Image>,
    /// Short readable identifier such as "party", not a base-62 ID
    pub id: String,
    /// Category name
    pub name: String,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: CategoryPage,
}

/// Also carries a `message` headline, which this endpoint doesn't surface
#[derive(Deserialize)]
struct PlaylistsEnvelope {
    playlists: SimplePlaylistPage,
}

impl Client {
    /// A single category
    ///
    /// Supported options: Country, Locale
    pub async fn get_category(&self, id: &str, opts: &[RequestOption]) -> Result<Category> {
        let url = self.http().endpoint(&["browse", "categories", id])?;
        self.http().get_json_with_config(url, with_options(opts)).await
    }

    /// Playlists tagged with a category
    ///
    /// Supported options: Country, Limit, Offset
    pub async fn get_category_playlists(
        &self,
        id: &str,
        opts: &[RequestOption],
    ) -> Result<SimplePlaylistPage> {
        let url = self
            .http()
            .endpoint(&["browse", "categories", id, "playlists"])?;
        let body: PlaylistsEnvelope = self
            .http()
            .get_json_with_config(url, with_options(opts))
            .await?;
        Ok(body.playlists)
    }

    /// All categories
    ///
    /// Supported options: Country, Locale, Limit, Offset
    pub async fn get_categories(&self, opts: &[RequestOption]) -> Result<CategoryPage> {
        let url = self.http().endpoint(&["browse", "categories"])?;
        let body: CategoriesEnvelope = self
            .http()
            .get_json_with_config(url, with_options(opts))
            .await?;
        Ok(body.categories)
    }
}
