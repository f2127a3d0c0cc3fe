//! Error types for the home feed.

use thiserror::Error;

/// Main error type for all feed operations.
///
/// None of these are fatal to a running feed: a failed fetch leaves the
/// previously shown recommendations in place.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request could not be completed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Response body was not a JSON array of songs.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL is malformed or cannot carry path segments.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Whether the backend was reached but refused the request.
    pub fn is_status(&self) -> bool {
        matches!(self, FeedError::Status { .. })
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
