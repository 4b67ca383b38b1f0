//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Clone)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for OAuth2 auth, shared between clones
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::ClientCredentials { .. } | AuthConfig::RefreshToken { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token.token))
            }
        }
    }

    /// Current token, fetching or refreshing it if needed
    pub async fn token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::None => Err(Error::NotTokenBacked),
            AuthConfig::Bearer { token } => Ok(CachedToken::new(token.clone(), None)),
            AuthConfig::ClientCredentials { .. } | AuthConfig::RefreshToken { .. } => {
                self.get_or_refresh_token().await
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<CachedToken> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let previous_refresh = cached.as_ref().and_then(|t| t.refresh_token.clone());
        let new_token = self.fetch_new_token(previous_refresh).await?;
        debug!("fetched new access token, expires at {:?}", new_token.expires_at);
        *cached = Some(new_token.clone());

        Ok(new_token)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self, previous_refresh: Option<String>) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scopes,
            } => {
                self.fetch_client_credentials(token_url, client_id, client_secret, scopes)
                    .await
            }

            AuthConfig::RefreshToken {
                token_url,
                client_id,
                client_secret,
                refresh_token,
            } => {
                // The accounts service may rotate refresh tokens; prefer the newest
                let refresh_token = previous_refresh.as_deref().unwrap_or(refresh_token);
                self.fetch_refresh(token_url, client_id, client_secret, refresh_token)
                    .await
            }

            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Fetch OAuth2 token using client credentials flow
    async fn fetch_client_credentials(
        &self,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        scopes: &[String],
    ) -> Result<CachedToken> {
        let mut form = vec![("grant_type", "client_credentials".to_string())];

        if !scopes.is_empty() {
            form.push(("scope", scopes.join(" ")));
        }

        let response = self
            .http_client
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::OAuth2 {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token(None))
    }

    /// Fetch OAuth2 token using refresh token flow
    async fn fetch_refresh(
        &self,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<CachedToken> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http_client
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("Refresh token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token(Some(refresh_token)))
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.config {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ClientCredentials { .. } => "client_credentials",
            AuthConfig::RefreshToken { .. } => "refresh_token",
        };
        f.debug_struct("Authenticator")
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenResponse {
    fn into_cached_token(self, used_refresh: Option<&str>) -> CachedToken {
        let mut token = match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        };
        token.refresh_token = self.refresh_token.or_else(|| used_refresh.map(String::from));
        token
    }
}
