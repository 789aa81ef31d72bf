//! HTTP client for the Sveriges Radio API
//!
//! This module provides a client for the public Sveriges Radio channel
//! API: the channel listing and channel artwork.
//!
//! # Example
//!
//! ```no_run
//! use srpapi::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new()?;
//!
//!     for channel in client.channels().await? {
//!         println!("{}: {:?}", channel.id, channel.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{Channel, SrResponse};
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default Sveriges Radio API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.sr.se/api/v2";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "SRPlayer/0.1.0 (srpapi)";

/// Sveriges Radio HTTP client
///
/// This client provides access to the public Sveriges Radio API for:
/// - Channel listing (names, taglines, accent colors, live stream URLs)
/// - Channel artwork (raw image payloads)
///
/// The client is stateless and does not cache responses internally.
/// Caching is handled by higher layers (see [`crate::SrDirectory`]).
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // ========================================================================
    // Channel Listing
    // ========================================================================

    /// Fetch the full channel listing
    ///
    /// # Caching
    ///
    /// This method does NOT cache results. For caching, use
    /// [`crate::SrDirectory`], which stores the listing with a TTL.
    pub async fn channels(&self) -> Result<Vec<Channel>> {
        let response: SrResponse = self.fetch_xml("channels").await?;
        Ok(response.channels.channels)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// GET an API path and decode the XML response body
    pub async fn fetch_xml<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        tracing::debug!("Fetching {}", url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(quick_xml::de::from_str(&body)?)
    }

    /// GET a raw payload, e.g. channel artwork
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Bytes> {
        tracing::debug!("Fetching bytes from {}", url);

        let response = self
            .client
            .get(url.as_str())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}

/// The client doubles as the session's artwork fetcher, so a playback
/// host needs no second HTTP stack for channel images.
#[async_trait::async_trait]
impl srpsession::ArtworkFetcher for ApiClient {
    async fn fetch(&self, url: &Url) -> srpsession::Result<Bytes> {
        self.fetch_bytes(url)
            .await
            .map_err(srpsession::SessionError::artwork)
    }
}

/// Builder for configuring an ApiClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Unit Tests (no network)
    // ========================================================================

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(builder.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_builder_overrides() {
        let builder = ClientBuilder::new()
            .base_url("http://localhost:8080")
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent");

        assert_eq!(builder.base_url, "http://localhost:8080");
        assert_eq!(builder.timeout, Duration::from_secs(5));
        assert_eq!(builder.user_agent, "test-agent");
    }

    // ========================================================================
    // Integration Tests (real API calls)
    //
    // Run with: cargo test -p srpapi -- --ignored
    // ========================================================================

    /// Test client creation
    #[tokio::test]
    #[ignore = "Integration test - calls real Sveriges Radio API"]
    async fn test_client_creation() {
        let client = ApiClient::new();
        assert!(client.is_ok(), "Failed to create client: {:?}", client.err());
    }

    /// Test the live channel listing
    #[tokio::test]
    #[ignore = "Integration test - calls real Sveriges Radio API"]
    async fn test_live_channels() {
        let client = ApiClient::new().expect("Failed to create client");
        let channels = client.channels().await;

        assert!(
            channels.is_ok(),
            "Failed to fetch channels: {:?}",
            channels.err()
        );

        let channels = channels.unwrap();
        assert!(!channels.is_empty(), "Expected at least one channel");

        println!("Fetched {} channels:", channels.len());
        for channel in channels.iter().take(5) {
            println!("  - {} ({:?})", channel.id, channel.name);
        }

        // The national channels should be present
        let names: Vec<&str> = channels.iter().filter_map(|c| c.name.as_deref()).collect();
        assert!(
            names.contains(&"P1") || names.contains(&"P2") || names.contains(&"P3"),
            "Expected at least one of P1, P2, or P3 in {:?}",
            names
        );
    }
}
