//! The fetch, parse and classify pipeline shared by both modes.
//!
//! Console mode and server mode run exactly the same steps; they only differ
//! in how they react to a failure. [`BoardError::severity`] is the single
//! place that decides how far a failure reaches, and each entry point maps
//! that onto its own policy.

use tracing::debug;

use crate::domain::{ClassifiedBoard, OriginTable, ScheduleError, classify};
use crate::resrobot::{ResRobotClient, ResRobotError, parse_arrivals};

/// Any failure while producing a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Fetching or decoding the upstream response failed
    #[error("arrival board: {0}")]
    Upstream(#[from] ResRobotError),

    /// One arrival's scheduled date or time could not be parsed
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// How much of a run an error spoils.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Only the affected arrival is unusable; the others are fine.
    Record,
    /// The whole board is unusable.
    Request,
}

impl BoardError {
    /// Classify this error.
    ///
    /// Console mode treats every severity as fatal. Server mode drops the
    /// affected arrival on [`Severity::Record`] and fails the request on
    /// [`Severity::Request`].
    pub fn severity(&self) -> Severity {
        match self {
            BoardError::Upstream(_) => Severity::Request,
            BoardError::Schedule(_) => Severity::Record,
        }
    }

    /// Whether the upstream did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BoardError::Upstream(e) if e.is_timeout())
    }
}

/// Fetch the arrival board and classify it.
///
/// Every call issues its own upstream request. Nothing is cached.
pub async fn fetch_board(
    client: &ResRobotClient,
    origins: &OriginTable,
) -> Result<ClassifiedBoard, BoardError> {
    let body = client.fetch_arrivals().await?;
    let arrivals = parse_arrivals(&body)?;
    let received = arrivals.len();

    let board = classify(arrivals, origins);
    debug!(
        received,
        in_to_city = board.arrivals_in_to_city.len(),
        out_of_city = board.arrivals_out_of_city.len(),
        "classified arrival board"
    );

    Ok(board)
}
