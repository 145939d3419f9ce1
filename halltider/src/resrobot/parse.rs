//! Decoding of raw arrival board bodies.

use super::error::ResRobotError;
use super::types::{Arrival, ArrivalBoard};

/// Longest body excerpt kept on a parse error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Decode an `arrivalBoard.json` body into its arrivals, in upstream order.
///
/// Fails with [`ResRobotError::Json`] when the body is not JSON or has no
/// `Arrival` sequence at the top level.
pub fn parse_arrivals(body: &[u8]) -> Result<Vec<Arrival>, ResRobotError> {
    let board: ArrivalBoard = serde_json::from_slice(body).map_err(|e| ResRobotError::Json {
        message: e.to_string(),
        body: Some(
            String::from_utf8_lossy(body)
                .chars()
                .take(BODY_EXCERPT_CHARS)
                .collect(),
        ),
    })?;

    Ok(board.arrivals)
}
