//! ResRobot v2 arrival board client.
//!
//! This module provides an HTTP client for the Samtrafiken ResRobot API,
//! which publishes real-time arrivals for Swedish public transport stops.
//!
//! Key characteristics of ResRobot:
//! - Authentication is a static API key passed as the `key` query parameter
//! - Dates are "YYYY-MM-DD" and times "HH:MM:SS", both Swedish local time
//! - Fields are omitted rather than sent as null, so every field defaults

mod client;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod parse;
mod types;

pub use client::ResRobotClient;
pub use error::ResRobotError;
pub use parse::parse_arrivals;
pub use types::{Arrival, ArrivalBoard, Product, Stop, Stops};
