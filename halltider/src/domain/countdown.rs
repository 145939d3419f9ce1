//! Scheduled arrival times and countdowns.
//!
//! ResRobot reports times as naive Swedish local timestamps split over a
//! `date` and a `time` field. Countdowns are taken against the board clock,
//! which is the host's UTC wall clock shifted by the configured offset.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::resrobot::Arrival;

/// Error returned when an arrival's date or time does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scheduled time {date:?} {time:?}: {reason}")]
pub struct ScheduleError {
    /// The `date` field as received.
    pub date: String,
    /// The `time` field as received.
    pub time: String,
    reason: &'static str,
}

/// A parsed scheduled arrival.
///
/// # Examples
///
/// ```
/// use halltider::domain::ScheduledArrival;
///
/// let at = ScheduledArrival::parse("2024-01-01", "14:32:00").unwrap();
/// assert_eq!(at.datetime().to_string(), "2024-01-01 14:32:00");
///
/// // Seconds are optional
/// assert!(ScheduledArrival::parse("2024-01-01", "14:32").is_ok());
///
/// assert!(ScheduledArrival::parse("01/01/2024", "14:32").is_err());
/// assert!(ScheduledArrival::parse("2024-01-01", "25:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledArrival(NaiveDateTime);

impl ScheduledArrival {
    /// Parse a "YYYY-MM-DD" date and an "HH:MM:SS" (or "HH:MM") time.
    pub fn parse(date: &str, time: &str) -> Result<Self, ScheduleError> {
        let error = |reason| ScheduleError {
            date: date.to_string(),
            time: time.to_string(),
            reason,
        };

        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| error("expected YYYY-MM-DD date"))?;
        let clock = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|_| error("expected HH:MM:SS time"))?;

        Ok(Self(day.and_time(clock)))
    }

    /// Parse the scheduled date and time of an arrival.
    pub fn of(arrival: &Arrival) -> Result<Self, ScheduleError> {
        Self::parse(&arrival.date, &arrival.time)
    }

    /// The scheduled timestamp.
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Whole minutes from `now` until this arrival, rounded up.
    ///
    /// Any part of a started minute counts as a full one: 5 minutes 12
    /// seconds away shows as 6. Arrivals in the past give zero or negative
    /// values, also rounded toward positive infinity.
    pub fn minutes_from(&self, now: NaiveDateTime) -> i64 {
        let gap = self.0 - now;
        // num_minutes truncates toward zero, which is already the ceiling
        // for negative gaps
        let minutes = gap.num_minutes();
        minutes + i64::from(gap > Duration::minutes(minutes))
    }
}

/// Current time on the board clock: UTC wall clock plus `offset`.
pub fn board_now(offset: Duration) -> NaiveDateTime {
    Utc::now().naive_utc() + offset
}
