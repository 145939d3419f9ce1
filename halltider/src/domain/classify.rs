//! Splitting an arrival board by direction.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::resrobot::Arrival;

use super::origin::{Direction, OriginTable};

/// Arrivals partitioned into the two directions.
///
/// Each bucket keeps the upstream order. Arrivals whose origin is not in the
/// [`OriginTable`] are in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedBoard {
    /// Arrivals heading toward the city centre.
    pub arrivals_in_to_city: Vec<Arrival>,
    /// Arrivals heading away from the city centre.
    pub arrivals_out_of_city: Vec<Arrival>,
}

impl ClassifiedBoard {
    /// The bucket for a direction.
    pub fn bucket(&self, direction: Direction) -> &[Arrival] {
        match direction {
            Direction::InToCity => &self.arrivals_in_to_city,
            Direction::OutOfCity => &self.arrivals_out_of_city,
        }
    }

    fn bucket_mut(&mut self, direction: Direction) -> &mut Vec<Arrival> {
        match direction {
            Direction::InToCity => &mut self.arrivals_in_to_city,
            Direction::OutOfCity => &mut self.arrivals_out_of_city,
        }
    }

    /// Total arrivals across both buckets.
    pub fn len(&self) -> usize {
        self.arrivals_in_to_city.len() + self.arrivals_out_of_city.len()
    }

    /// Whether both buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the arrivals for which `keep` returns true, in both buckets.
    pub fn retain(&mut self, mut keep: impl FnMut(&Arrival) -> bool) {
        self.arrivals_in_to_city.retain(&mut keep);
        self.arrivals_out_of_city.retain(&mut keep);
    }
}

/// Partition `arrivals` by origin.
///
/// Single pass, order preserved within each bucket. Unknown origins are
/// dropped without error.
pub fn classify(arrivals: Vec<Arrival>, table: &OriginTable) -> ClassifiedBoard {
    let mut board = ClassifiedBoard::default();

    for arrival in arrivals {
        debug!(
            line = %arrival.product.num,
            operator = %arrival.product.operator,
            origin = %arrival.origin,
            "arrival"
        );

        match table.lookup(&arrival.origin) {
            Some(rule) => board.bucket_mut(rule.direction).push(arrival),
            None => trace!(origin = %arrival.origin, "unknown origin, skipping"),
        }
    }

    board
}
