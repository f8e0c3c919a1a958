//! Badge content download
//!
//! A fetch is exactly one GET request: redirects are followed, the whole
//! exchange is bounded by the configured timeout, and nothing is retried.

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Downloads raw badge bytes
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Download `url`
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when no response arrives (DNS, connect, timeout)
    /// - [`Error::HttpStatus`] when the response status is not 200
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// reqwest-backed fetcher
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from fetch settings
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, url: &str, e: &reqwest::Error) -> Error {
        let message = if e.is_timeout() {
            format!("timed out after {:?}", self.timeout)
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        Error::Transport {
            url: url.to_string(),
            message,
        }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "fetching badge");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(url, &e))?;

        debug!(url = %url, bytes = content.len(), "badge downloaded");
        Ok(content.to_vec())
    }
}
