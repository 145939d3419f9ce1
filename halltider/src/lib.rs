//! Arrival board for a single ResRobot stop.
//!
//! Fetches the upcoming arrivals, splits them into buses heading toward and
//! away from the city centre, and either prints a countdown board or serves
//! the split board as JSON.

pub mod board;
pub mod config;
pub mod console;
pub mod domain;
pub mod resrobot;
pub mod web;
