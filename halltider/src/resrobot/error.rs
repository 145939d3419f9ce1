//! ResRobot client error types.

use std::time::Duration;

/// Errors from fetching or decoding an arrival board.
#[derive(Debug, thiserror::Error)]
pub enum ResRobotError {
    /// The request did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP request failed (connection refused, DNS, broken body, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not JSON, or not shaped like an arrival board
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Writing the raw response dump failed
    #[error("failed to write raw response to {path}: {source}")]
    Dump {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResRobotError {
    /// Whether this error means the upstream did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ResRobotError::Timeout(_))
    }
}
