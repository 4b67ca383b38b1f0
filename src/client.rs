//! Web API client
//!
//! [`Client`] is the entry point for every endpoint. It is cheap to clone:
//! clones share the connection pool and the token cache.

use crate::auth::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use crate::http::{check_response, HttpClient, HttpClientConfig, Pacing};
use crate::types::Image;
use bytes::Bytes;
use std::time::Duration;

/// Client for the Spotify Web API
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Client against the public Web API with default settings
    pub fn new(auth: AuthConfig) -> Result<Self> {
        Self::builder().auth(auth).build()
    }

    /// Start configuring a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Wrap an already configured transport
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Transport every call goes through
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Current access token.
    ///
    /// Fails with [`Error::NotTokenBacked`] when the client was built
    /// without a token source.
    pub async fn token(&self) -> Result<CachedToken> {
        self.http.token().await
    }

    /// Download the image behind `image.url`
    pub async fn download_image(&self, image: &Image) -> Result<Bytes> {
        let response = self
            .http
            .inner()
            .get(&image.url)
            .send()
            .await
            .map_err(Error::Http)?;
        let response = check_response(response).await?;
        response.bytes().await.map_err(Error::Http)
    }
}

/// Builder for [`Client`]
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: HttpClientConfig,
    auth: AuthConfig,
}

impl ClientBuilder {
    /// Use another base URL, e.g. a staging environment or a mock server
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Send `Accept-Language` on every request
    #[must_use]
    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.config
            .default_headers
            .insert("Accept-Language".to_string(), lang.into());
        self
    }

    /// Enable or disable waiting out 429 responses
    #[must_use]
    pub fn retry(mut self, enabled: bool) -> Self {
        self.config.retry_on_rate_limit = enabled;
        self
    }

    /// Wait used when a 429 has no usable `Retry-After`
    #[must_use]
    pub fn retry_fallback(mut self, fallback: Duration) -> Self {
        self.config.retry_fallback = fallback;
        self
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Pace requests on the client side, on top of honoring server pauses
    #[must_use]
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.config.pacing = Some(pacing);
        self
    }

    /// Token source for every request
    #[must_use]
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        let http = HttpClient::with_auth(self.config, self.auth)?;
        Ok(Client { http })
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_maps_onto_transport_config() {
        let client = Client::builder()
            .base_url("http://localhost:1234/v1")
            .accept_language("de")
            .retry(false)
            .retry_fallback(Duration::from_millis(10))
            .timeout(Duration::from_secs(3))
            .pacing(Pacing::new(5, 5))
            .auth(AuthConfig::bearer("t"))
            .build()
            .unwrap();

        let config = client.http().config();
        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert_eq!(
            config.default_headers.get("Accept-Language"),
            Some(&"de".to_string())
        );
        assert!(!config.retry_on_rate_limit);
        assert_eq!(config.retry_fallback, Duration::from_millis(10));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(client.http().throttle().is_paced());
        assert!(client.http().has_authenticator());
    }

    #[tokio::test]
    async fn test_token_requires_source() {
        let client = Client::new(AuthConfig::None).unwrap();
        assert!(matches!(client.token().await, Err(Error::NotTokenBacked)));

        let client = Client::new(AuthConfig::bearer("abc")).unwrap();
        assert_eq!(client.token().await.unwrap().token, "abc");
    }

    #[tokio::test]
    async fn test_accept_language_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/markets"))
            .and(header("Accept-Language", "es"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::builder()
            .base_url(server.uri())
            .accept_language("es")
            .build()
            .unwrap();
        let url = client.http().endpoint(&["markets"]).unwrap();
        client.http().get(url).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_image() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/image/ab67"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
            .mount(&server)
            .await;

        let client = Client::new(AuthConfig::None).unwrap();
        let image = Image {
            height: Some(640),
            width: Some(640),
            url: format!("{}/image/ab67", server.uri()),
        };

        let data = client.download_image(&image).await.unwrap();
        assert_eq!(data.as_ref(), &[0xff, 0xd8, 0xff]);
    }
}
