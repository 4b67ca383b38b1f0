//! HTTP client for the Web API
//!
//! Composes every outbound call the same way:
//! - base URL plus percent-encoded path segments
//! - query parameters, headers and an optional body
//! - bearer authentication from the configured token source
//! - the shared throttle (server pauses, optional pacing), then 429 retry
//! - failure responses decoded into [`ApiError`](crate::error::ApiError)

use super::error_decoder::check_response;
use super::rate_limit::{Pacing, Throttle};
use super::retry::{RetryPolicy, DEFAULT_RETRY_DURATION};
use crate::auth::{AuthConfig, Authenticator, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default base URL of the Web API
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1/";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all relative requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Retry 429 responses after the server-requested wait
    pub retry_on_rate_limit: bool,
    /// Wait used when a 429 carries no usable `Retry-After`
    pub retry_fallback: Duration,
    /// Up-front request pacing; server pauses apply regardless
    pub pacing: Option<Pacing>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry_on_rate_limit: true,
            retry_fallback: DEFAULT_RETRY_DURATION,
            pacing: None,
            default_headers: HashMap::new(),
            user_agent: format!("spotify-web/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Retry policy derived from this config
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            enabled: self.retry_on_rate_limit,
            fallback: self.retry_fallback,
        }
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable or disable 429 retry
    pub fn retry(mut self, enabled: bool) -> Self {
        self.config.retry_on_rate_limit = enabled;
        self
    }

    /// Set the wait used when `Retry-After` is missing
    pub fn retry_fallback(mut self, fallback: Duration) -> Self {
        self.config.retry_fallback = fallback;
        self
    }

    /// Pace requests up front
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.config.pacing = Some(pacing);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Body of a single request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON-serialized body
    Json(Value),
    /// Raw bytes with an explicit content type
    Bytes {
        /// Value of the `Content-Type` header
        content_type: String,
        /// Body payload
        data: Vec<u8>,
    },
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge a map of query parameters
    #[must_use]
    pub fn params(mut self, params: HashMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a raw body
    #[must_use]
    pub fn bytes(mut self, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Bytes {
            content_type: content_type.into(),
            data,
        });
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client with auth, 429 retry and error decoding
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: Url,
    authenticator: Option<Authenticator>,
    throttle: Throttle,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Self::with_reqwest(client, config)
    }

    /// Wrap an existing reqwest client
    pub fn with_reqwest(client: Client, config: HttpClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let throttle = Throttle::new(config.pacing);

        Ok(Self {
            client,
            config,
            base_url,
            authenticator: None,
            throttle,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = match auth_config {
            AuthConfig::None => None,
            config => Some(Authenticator::with_client(config, self.client.clone())),
        };
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Current access token of the token source backing this client
    pub async fn token(&self) -> Result<CachedToken> {
        match &self.authenticator {
            Some(auth) => auth.token().await,
            None => Err(Error::NotTokenBacked),
        }
    }

    /// Build an endpoint URL from path segments, escaping each one
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a link returned by the API.
    ///
    /// Absolute links are used as-is. A link starting with `/` is rooted at
    /// the base URL's origin; any other relative link extends the base path.
    pub fn resolve(&self, link: &str) -> Result<Url> {
        match Url::parse(link) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.base_url.join(link)?),
            Err(e) => Err(Error::InvalidUrl(e)),
        }
    }

    /// Make a GET request
    pub async fn get(&self, url: Url) -> Result<Response> {
        self.request(Method::GET, url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, url: Url, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, url, config).await
    }

    /// Make a POST request
    pub async fn post(&self, url: Url, body: Value) -> Result<Response> {
        self.request(Method::POST, url, RequestConfig::default().json(body))
            .await
    }

    /// Make a generic request
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<Response> {
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let mut req = self.client.request(method.clone(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match config.body {
            Some(RequestBody::Json(ref body)) => req = req.json(body),
            Some(RequestBody::Bytes {
                ref content_type,
                ref data,
            }) => {
                req = req
                    .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
                    .body(data.clone());
            }
            None => {}
        }

        req = req.timeout(timeout);

        // Applied once; 429 retries resend this exact token
        if let Some(ref auth) = self.authenticator {
            req = auth.apply(req).await?;
        }

        let request = req.build().map_err(Error::Http)?;
        let response = match request.try_clone() {
            // Streaming bodies cannot be replayed, so they get a single shot
            None => {
                self.throttle.ready().await;
                self.client.execute(request).await.map_err(Error::Http)?
            }
            Some(_) => {
                self.config
                    .retry_policy()
                    .run(&self.throttle, || {
                        let attempt = request.try_clone();
                        async move {
                            let attempt = attempt
                                .ok_or_else(|| Error::Other("request cannot be replayed".into()))?;
                            self.client.execute(attempt).await.map_err(Error::Http)
                        }
                    })
                    .await?
            }
        };

        debug!("{} {} -> {}", method, url, response.status().as_u16());
        check_response(response).await
    }

    /// Make a request and parse JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let body = response.bytes().await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Make a request whose response body is irrelevant
    pub async fn request_empty(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<()> {
        self.request(method, url, config).await?;
        Ok(())
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.request_json(Method::GET, url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config and parse JSON response
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: Url,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// Throttle shared by every clone of this client
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Check if requests carry authentication
    pub fn has_authenticator(&self) -> bool {
        self.authenticator.is_some()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

/// Parse the base URL, making sure relative joins land under its path
fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
