//! ResRobot HTTP client.
//!
//! Issues the single `arrivalBoard.json` request this service needs. The
//! response body is handed back untouched; decoding happens in
//! [`parse_arrivals`](super::parse_arrivals).

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::config::Config;

use super::error::ResRobotError;

/// ResRobot arrival board client.
///
/// Cheap to share: the inner `reqwest::Client` is reference counted and
/// nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct ResRobotClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    site_id: String,
    max_journeys: u32,
    timeout: Duration,
    dump_path: Option<PathBuf>,
}

impl ResRobotClient {
    /// Create a client from the process configuration.
    ///
    /// In debug mode every fetched body is also written to
    /// `config.dump_path`.
    pub fn new(config: &Config) -> Result<Self, ResRobotError> {
        // gzip and deflate are negotiated and decoded by reqwest itself
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            site_id: config.site_id.clone(),
            max_journeys: config.max_journeys,
            timeout: config.timeout,
            dump_path: config.dump_target().map(PathBuf::from),
        })
    }

    /// URL of the arrival board endpoint, without query parameters.
    pub fn board_url(&self) -> String {
        format!("{}/arrivalBoard.json", self.base_url)
    }

    /// Fetch the raw arrival board for the configured stop.
    ///
    /// The HTTP status is logged but not acted on: an error payload comes
    /// back as a body like any other and fails later, at parse time.
    pub async fn fetch_arrivals(&self) -> Result<Bytes, ResRobotError> {
        let url = self.board_url();
        let max_journeys = self.max_journeys.to_string();

        // The key is a query parameter, so only log the path and the rest
        debug!(
            url = %url,
            id = %self.site_id,
            max_journeys = self.max_journeys,
            "==> calling arrival board"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("id", self.site_id.as_str()),
                ("maxJourneys", max_journeys.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                "arrival board returned a non-success status"
            );
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(bytes = body.len(), status = status.as_u16(), "arrival board received");

        if let Some(path) = &self.dump_path {
            std::fs::write(path, &body).map_err(|source| ResRobotError::Dump {
                path: path.display().to_string(),
                source,
            })?;
            debug!(path = %path.display(), "raw response written");
        }

        Ok(body)
    }

    /// Classify a reqwest failure, stripping the URL so the key stays out
    /// of logs.
    fn transport_error(&self, err: reqwest::Error) -> ResRobotError {
        if err.is_timeout() {
            ResRobotError::Timeout(self.timeout)
        } else {
            ResRobotError::Http(err.without_url())
        }
    }
}
