//! HTTP fetcher implementation
//!
//! This module handles the single network retrieval the crawler performs per
//! address:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests that drain the whole body into memory
//! - Error classification, tagged with the originating address
//!
//! There is no retry and no backoff: one call is one request.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// A failed retrieval of one address
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("failed to fetch {address}: {kind}")]
pub struct FetchError {
    /// The address that was being fetched
    pub address: String,

    /// What went wrong
    pub kind: FetchErrorKind,
}

/// Classification of fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Connection could not be established (DNS, refused, TLS)
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Any other transport failure, including malformed addresses
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but its body could not be read
    #[error("failed to read body: {0}")]
    Body(String),

    /// The server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl FetchError {
    pub fn new(address: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            address: address.into(),
            kind,
        }
    }
}

/// A transport able to retrieve the content of one address
///
/// The coordinator only ever talks to this trait, so any source of pages can
/// drive a crawl.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieves the full content of `address`
    async fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use webc::config::Config;
/// use webc::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.crawler.request_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the configuration and wraps it
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| FetchError::new(address, classify_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                address,
                FetchErrorKind::HttpStatus(status.as_u16()),
            ));
        }

        response.text().await.map_err(|e| {
            let kind = if e.is_timeout() {
                FetchErrorKind::Timeout
            } else {
                FetchErrorKind::Body(e.to_string())
            };
            FetchError::new(address, kind)
        })
    }
}

/// Maps a reqwest send error onto a fetch error kind
fn classify_request_error(e: &reqwest::Error) -> FetchErrorKind {
    if e.is_timeout() {
        FetchErrorKind::Timeout
    } else if e.is_connect() {
        FetchErrorKind::Connect(e.to_string())
    } else {
        FetchErrorKind::Transport(e.to_string())
    }
}
