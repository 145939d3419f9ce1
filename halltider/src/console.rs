//! Console rendering of the arrival board.
//!
//! Rows are built first, which is where scheduled times get parsed, and only
//! then rendered. A bad time therefore fails [`ConsoleReport::build`] before
//! anything has been printed.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::board::{BoardError, fetch_board};
use crate::config::Config;
use crate::domain::{
    ClassifiedBoard, Direction, OriginRule, OriginTable, ScheduleError, ScheduledArrival,
    board_now,
};
use crate::resrobot::{Arrival, ResRobotClient};

/// One line of the console board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// Line number.
    pub line: String,
    /// Destination label from the origin rule.
    pub destination: String,
    /// Scheduled time as reported upstream.
    pub time: String,
    /// Minutes until arrival, rounded up.
    pub minutes: i64,
}

impl BoardRow {
    /// Build a row for `arrival`, counting down from `now`.
    pub fn build(
        arrival: &Arrival,
        rule: &OriginRule,
        now: NaiveDateTime,
    ) -> Result<Self, ScheduleError> {
        let scheduled = ScheduledArrival::of(arrival)?;

        Ok(Self {
            line: arrival.transport_number.clone(),
            destination: rule.destination.clone(),
            time: arrival.time.clone(),
            minutes: scheduled.minutes_from(now),
        })
    }
}

impl fmt::Display for BoardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8}{:<20}{:<12}{}m",
            self.line, self.destination, self.time, self.minutes
        )
    }
}

/// Both directions of the board, ready to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleReport {
    pub in_to_city: Vec<BoardRow>,
    pub out_of_city: Vec<BoardRow>,
}

impl ConsoleReport {
    /// Build rows for every classified arrival.
    ///
    /// Fails on the first arrival whose scheduled time does not parse.
    pub fn build(
        board: &ClassifiedBoard,
        origins: &OriginTable,
        now: NaiveDateTime,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            in_to_city: rows(board.bucket(Direction::InToCity), origins, now)?,
            out_of_city: rows(board.bucket(Direction::OutOfCity), origins, now)?,
        })
    }
}

fn rows(
    arrivals: &[Arrival],
    origins: &OriginTable,
    now: NaiveDateTime,
) -> Result<Vec<BoardRow>, ScheduleError> {
    let mut rows = Vec::with_capacity(arrivals.len());
    for arrival in arrivals {
        // A board classified with a different table may hold unknown origins
        let Some(rule) = origins.lookup(&arrival.origin) else {
            trace!(origin = %arrival.origin, "no rule for origin, not printed");
            continue;
        };
        rows.push(BoardRow::build(arrival, rule, now)?);
    }
    Ok(rows)
}

impl fmt::Display for ConsoleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, "Bussar in mot stan:", &self.in_to_city)?;
        writeln!(f)?;
        write_section(f, "Bussar ut från stan:", &self.out_of_city)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, heading: &str, rows: &[BoardRow]) -> fmt::Result {
    writeln!(f, "{heading}")?;
    writeln!(f)?;
    writeln!(
        f,
        "{:<8}{:<20}{:<12}{}",
        "Linje:", "Destination:", "Ankomst:", "Om:"
    )?;
    for row in rows {
        writeln!(f, "{row}")?;
    }
    Ok(())
}

/// Fetch the board once and print it to stdout.
pub async fn run(
    client: &ResRobotClient,
    origins: &OriginTable,
    config: &Config,
) -> Result<(), BoardError> {
    let board = fetch_board(client, origins).await?;
    let report = ConsoleReport::build(&board, origins, board_now(config.clock_offset))?;
    print!("{report}");
    Ok(())
}
