//! Auth configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token endpoint of the Spotify accounts service
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication; the client is not token-backed
    #[default]
    None,

    /// A ready-made access token obtained elsewhere
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth2 Client Credentials flow (app-only access)
    ClientCredentials {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Requested scopes
        scopes: Vec<String>,
    },

    /// OAuth2 Refresh Token flow (user access)
    RefreshToken {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Refresh token
        refresh_token: String,
    },
}

impl AuthConfig {
    /// Bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Client credentials against the Spotify accounts service
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::ClientCredentials {
            token_url: TOKEN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
        }
    }

    /// Whether requests made with this config carry a token
    pub fn is_token_backed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Cached token with expiration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token handed out alongside the access token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token,
            expires_at,
            refresh_token: None,
        }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self::new(token, Some(expires_at))
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}
