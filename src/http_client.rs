//! HTTP Client Module
//!
//! Builds the shared reqwest client used by feed fetching, the model client
//! and the REST store. There is no retry layer here: a failed request fails
//! the current entry or source, and the next cycle tries again.

use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::error::{PipelineError, Result};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub request_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("roboportal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.feed_timeout_secs),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        }
    }
}

/// Builds a reqwest client from the given configuration
pub fn build_client(config: &HttpClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(PipelineError::HttpError)
}
