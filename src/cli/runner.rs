//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Client;
use crate::config::ClientSettings;
use crate::error::{Result, ResultExt};
use crate::options::{self, RequestOption};
use crate::types::Id;
use futures::TryStreamExt;
use serde::Serialize;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.build_client()?;

        match &self.cli.command {
            Commands::Token => self.output(&client.token().await?),
            Commands::Artist { id } => self.output(&client.get_artist(&Id::new(id)).await?),
            Commands::Playlist { id, market } => {
                let opts: Vec<RequestOption> = market.iter().map(options::market).collect();
                self.output(&client.get_playlist(&Id::new(id), &opts).await?)
            }
            Commands::PlaylistTracks { id, limit, all } => {
                self.playlist_tracks(&client, id, *limit, *all).await
            }
            Commands::Categories {
                country,
                locale,
                limit,
            } => {
                let mut opts: Vec<RequestOption> = country.iter().map(options::country).collect();
                opts.extend(locale.iter().map(options::locale));
                opts.extend(limit.map(options::limit));
                self.output(&client.get_categories(&opts).await?)
            }
            Commands::NewReleases { country, limit } => {
                let mut opts: Vec<RequestOption> = country.iter().map(options::country).collect();
                opts.extend(limit.map(options::limit));
                self.output(&client.new_releases(&opts).await?)
            }
            Commands::LibraryContains { ids } => {
                let ids: Vec<Id> = ids.iter().map(Id::new).collect();
                let saved = client.user_has_tracks(&ids).await?;
                let report: Vec<_> = ids
                    .iter()
                    .zip(saved)
                    .map(|(id, saved)| serde_json::json!({ "id": id, "saved": saved }))
                    .collect();
                self.output(&report)
            }
        }
    }

    /// Client from `--config`, or from the environment
    fn build_client(&self) -> Result<Client> {
        let settings = match &self.cli.config {
            Some(path) => {
                debug!("loading client settings from {}", path.display());
                ClientSettings::load(path)
                    .with_context(|| format!("loading settings from {}", path.display()))?
            }
            None => ClientSettings::from_env()?,
        };
        settings.build_client()
    }

    async fn playlist_tracks(
        &self,
        client: &Client,
        id: &str,
        limit: Option<u32>,
        all: bool,
    ) -> Result<()> {
        let opts: Vec<RequestOption> = limit.map(options::limit).into_iter().collect();
        let first = client.get_playlist_tracks(&Id::new(id), &opts).await?;
        info!("playlist {id} has {} entries", first.total);

        if !all {
            return self.output(&first);
        }

        let mut pages = Box::pin(client.pages(first));
        let mut number = 0;
        while let Some(page) = pages.try_next().await? {
            number += 1;
            debug!("page {number} has {} entries", page.len());
            for entry in &page.items {
                self.output(entry)?;
            }
        }
        Ok(())
    }

    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}
