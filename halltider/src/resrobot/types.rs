//! ResRobot API response DTOs.
//!
//! These types map directly to the `arrivalBoard.json` response. ResRobot
//! omits fields rather than sending them empty, so every record type takes
//! `#[serde(default)]` and missing fields come back as empty strings or zero.
//!
//! The same types are serialized back out by the web layer, with the field
//! names they were read with.

use serde::{Deserialize, Serialize};

/// Top level of an `arrivalBoard.json` response.
///
/// `Arrival` is the only required key. A body without it (an error payload,
/// say) is rejected rather than treated as an empty board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrivalBoard {
    #[serde(rename = "Arrival")]
    pub arrivals: Vec<Arrival>,
}

/// One predicted arrival at the board stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arrival {
    /// Line and operator details.
    #[serde(rename = "Product")]
    pub product: Product,

    /// Intermediate stops, when the API includes them.
    #[serde(rename = "Stops")]
    pub stops: Stops,

    /// Display name of the journey (e.g. "Länstrafik - Buss 117").
    pub name: String,

    /// Name of the board stop.
    pub stop: String,

    /// Internal id of the board stop.
    #[serde(rename = "stopid")]
    pub stop_id: String,

    /// External id of the board stop.
    #[serde(rename = "stopExtId")]
    pub stop_ext_id: String,

    /// Scheduled arrival time, "HH:MM:SS".
    pub time: String,

    /// Scheduled arrival date, "YYYY-MM-DD".
    pub date: String,

    /// Stop the vehicle is arriving from.
    pub origin: String,

    /// Line number shown to passengers.
    #[serde(rename = "transportNumber")]
    pub transport_number: String,

    /// Transport category code (e.g. "BLT" for bus).
    #[serde(rename = "transportCategory")]
    pub transport_category: String,
}

/// Line and operator information for an arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub num: String,
    pub cat_code: String,
    pub cat_out_s: String,
    pub cat_out_l: String,
    pub operator_code: String,
    pub operator: String,
    pub operator_url: String,
}

/// Wrapper around the intermediate stop list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stops {
    #[serde(rename = "Stop")]
    pub stop: Vec<Stop>,
}

/// An intermediate stop on the arriving journey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stop {
    pub name: String,
    pub id: String,
    pub ext_id: String,
    pub route_idx: i64,
    pub lon: f64,
    pub lat: f64,
    pub dep_time: String,
    pub dep_date: String,
}
