//! Error types

use thiserror::Error;

use crate::models::FeedKind;

/// Failure talking to the remote feed source
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection, TLS, timeout)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body, as text
        body: String,
    },

    /// Response body was not what we expected
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure of a feed operation
#[derive(Debug, Error)]
pub enum FeedError {
    /// Loading a page failed; the list was left as it was
    #[error("failed to load {kind} feed")]
    Fetch {
        /// Feed being loaded
        kind: FeedKind,
        /// Underlying cause
        #[source]
        source: ApiError,
    },

    /// An update was refused because it would corrupt the list
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// The feed task is gone
    #[error("feed worker has shut down")]
    Closed,
}

/// Result alias for feed operations
pub type Result<T, E = FeedError> = std::result::Result<T, E>;
