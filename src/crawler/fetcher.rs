//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with explicit timeouts
//! - GET requests for listing, detail, and image resources
//! - Error classification into [`NetworkError`] variants
//!
//! There is no retry: the caller decides whether a failure aborts its
//! operation or is logged and skipped.

use crate::config::CrawlerConfig;
use crate::NetworkError;
use reqwest::{Client, Response};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (timeouts, optional user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use shelf_scraper::config::CrawlerConfig;
/// use shelf_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true);

    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }

    builder.build()
}

/// Thin wrapper over a shared [`Client`] that maps every failure to a
/// [`NetworkError`]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from crawler settings
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a page and returns its body as text
    ///
    /// Status codes >= 400 are failures; the body of an error response is
    /// never returned.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, NetworkError> {
        let response = self.send(url).await?;
        response
            .text()
            .await
            .map_err(|e| classify_error(url.as_str(), e))
    }

    /// Fetches a resource and returns the raw bytes
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        let response = self.send(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(url.as_str(), e))?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &Url) -> Result<Response, NetworkError> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url.as_str(), e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Maps a transport error onto the crate's network taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> NetworkError {
    if error.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        NetworkError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else if let Some(status) = error.status() {
        NetworkError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        NetworkError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
