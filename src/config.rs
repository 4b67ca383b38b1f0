//! Client settings loaded from YAML or the environment
//!
//! ```yaml
//! base_url: https://api.spotify.com/v1/
//! accept_language: sv
//! timeout_seconds: 30
//! retry:
//!   enabled: true
//!   fallback_seconds: 5
//! pacing:
//!   requests_per_second: 10
//!   burst_size: 10
//! auth:
//!   type: client_credentials
//!   client_id: ${SPOTIFY_ID}
//!   client_secret: ${SPOTIFY_SECRET}
//! ```
//!
//! `${VAR}` references are replaced with environment values before the YAML
//! is parsed. A reference to an unset variable is an error.

use crate::auth::{AuthConfig, TOKEN_URL};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::Pacing;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Matches `${NAME}` environment references
static ENV_VAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
});

/// Environment variable holding a client ID
pub const ENV_CLIENT_ID: &str = "SPOTIFY_ID";
/// Environment variable holding a client secret
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_SECRET";
/// Environment variable holding a ready-made access token
pub const ENV_TOKEN: &str = "SPOTIFY_TOKEN";

// ============================================================================
// Settings
// ============================================================================

/// Everything needed to build a [`Client`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL override
    pub base_url: Option<String>,
    /// `Accept-Language` sent with every request
    pub accept_language: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// 429 handling
    pub retry: RetrySettings,
    /// Client-side pacing; off when absent
    pub pacing: Option<PacingSettings>,
    /// Token source
    pub auth: AuthSettings,
}

/// 429 handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Wait out 429 responses and resend
    pub enabled: bool,
    /// Wait in seconds when `Retry-After` is missing or malformed
    pub fallback_seconds: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback_seconds: 5,
        }
    }
}

/// Up-front request pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingSettings {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Bucket size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_burst() -> u32 {
    10
}

/// Token source as written in YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthSettings {
    /// Unauthenticated
    #[default]
    None,

    /// Ready-made access token
    Bearer {
        /// The token
        token: String,
    },

    /// App-only access via client credentials
    ClientCredentials {
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Requested scopes
        #[serde(default)]
        scopes: Vec<String>,
        /// Token endpoint
        #[serde(default = "default_token_url")]
        token_url: String,
    },

    /// User access via a refresh token
    RefreshToken {
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Refresh token granted by the user
        refresh_token: String,
        /// Token endpoint
        #[serde(default = "default_token_url")]
        token_url: String,
    },
}

fn default_token_url() -> String {
    TOKEN_URL.to_string()
}

impl From<AuthSettings> for AuthConfig {
    fn from(settings: AuthSettings) -> Self {
        match settings {
            AuthSettings::None => AuthConfig::None,
            AuthSettings::Bearer { token } => AuthConfig::Bearer { token },
            AuthSettings::ClientCredentials {
                client_id,
                client_secret,
                scopes,
                token_url,
            } => AuthConfig::ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scopes,
            },
            AuthSettings::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
                token_url,
            } => AuthConfig::RefreshToken {
                token_url,
                client_id,
                client_secret,
                refresh_token,
            },
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ClientSettings {
    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML text, interpolating `${VAR}` first
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let yaml = interpolate_env(yaml)?;
        let settings: Self = serde_yaml::from_str(&yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `SPOTIFY_TOKEN`, or `SPOTIFY_ID` plus `SPOTIFY_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let auth = if let Some(token) = lookup(ENV_TOKEN) {
            AuthSettings::Bearer { token }
        } else {
            match (lookup(ENV_CLIENT_ID), lookup(ENV_CLIENT_SECRET)) {
                (Some(client_id), Some(client_secret)) => AuthSettings::ClientCredentials {
                    client_id,
                    client_secret,
                    scopes: Vec::new(),
                    token_url: default_token_url(),
                },
                _ => {
                    return Err(Error::config(format!(
                        "set {ENV_TOKEN}, or both {ENV_CLIENT_ID} and {ENV_CLIENT_SECRET}"
                    )))
                }
            }
        };

        Ok(Self {
            auth,
            ..Self::default()
        })
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == Some(0) {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }
        if let Some(limit) = &self.pacing {
            if limit.requests_per_second == 0 || limit.burst_size == 0 {
                return Err(Error::config(
                    "pacing requests_per_second and burst_size must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Build a client from these settings
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .retry(self.retry.enabled)
            .retry_fallback(Duration::from_secs(self.retry.fallback_seconds))
            .auth(self.auth.clone().into());

        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(lang) = &self.accept_language {
            builder = builder.accept_language(lang);
        }
        if let Some(secs) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = &self.pacing {
            builder = builder.pacing(Pacing::new(
                limit.requests_per_second,
                limit.burst_size,
            ));
        }

        builder.build()
    }
}

/// Replace every `${VAR}` in `text` with the value of that environment variable
pub fn interpolate_env(text: &str) -> Result<String> {
    interpolate_with(text, |name| std::env::var(name).ok())
}

fn interpolate_with(text: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ENV_VAR_REGEX.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = lookup(name.as_str()).ok_or_else(|| Error::undefined_var(name.as_str()))?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}
