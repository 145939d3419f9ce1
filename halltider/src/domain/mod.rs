//! Domain logic for the arrival board.
//!
//! Direction rules, classification of upstream arrivals into the two
//! buckets, and countdown arithmetic. Nothing in here does I/O.

mod classify;
mod countdown;
mod origin;

pub use classify::{ClassifiedBoard, classify};
pub use countdown::{ScheduleError, ScheduledArrival, board_now};
pub use origin::{Direction, OriginRule, OriginTable};
