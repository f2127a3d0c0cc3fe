//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::{FeedError, Result};

/// Address of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("songfeed/", env!("CARGO_PKG_VERSION"));

/// Settings for [`RecommendApi`](crate::api::RecommendApi).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend root; API paths are appended to it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given backend root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` does not parse or cannot carry
    /// path segments (e.g. `mailto:`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            ..Default::default()
        })
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
