//! Origin stop rules.
//!
//! An arrival's origin is the stop its vehicle is coming from, and at the
//! reference stop that alone tells us which way it is heading. One table maps
//! each known origin to a direction and to the destination label shown on
//! the console board, so classification and display can never disagree.

use std::collections::HashMap;

/// Travel direction relative to the city centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the city centre.
    InToCity,
    /// Away from the city centre.
    OutOfCity,
}

/// What a known origin means for an arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRule {
    /// Which bucket the arrival belongs to.
    pub direction: Direction,
    /// Destination shown on the console board.
    pub destination: String,
}

/// Immutable origin → rule lookup, matched on the exact origin name.
#[derive(Debug, Clone, Default)]
pub struct OriginTable {
    rules: HashMap<String, OriginRule>,
}

impl OriginTable {
    /// An empty table. Every arrival is a miss.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the reference stop (Johannesfred, site 740049185).
    pub fn standard() -> Self {
        Self::new()
            .with_rule("Spånga station (Stockholm kn)", Direction::InToCity, "Alvik")
            .with_rule(
                "Blackebergs gård (Stockholm kn)",
                Direction::InToCity,
                "Solna centrum",
            )
            .with_rule(
                "Alvik T-bana (Stockholm kn)",
                Direction::OutOfCity,
                "Spånga station",
            )
            .with_rule(
                "Solna centrum T-bana",
                Direction::OutOfCity,
                "Blackebergs gård",
            )
            .with_rule(
                "Tritonvägen (Sundbyberg kn)",
                Direction::OutOfCity,
                "Blackebergs gård",
            )
    }

    /// Add (or replace) the rule for `origin`.
    pub fn with_rule(
        mut self,
        origin: impl Into<String>,
        direction: Direction,
        destination: impl Into<String>,
    ) -> Self {
        self.rules.insert(
            origin.into(),
            OriginRule {
                direction,
                destination: destination.into(),
            },
        );
        self
    }

    /// Look up the rule for an origin name.
    pub fn lookup(&self, origin: &str) -> Option<&OriginRule> {
        self.rules.get(origin)
    }

    /// Number of known origins.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
