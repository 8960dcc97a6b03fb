//! Domain record types
//!
//! One struct per row of scraped data. Cells that are missing from the source
//! markup are `None` and serialize as JSON `null`; a record is never dropped
//! because a cell failed to parse.

use serde::{Deserialize, Serialize};

/// One race on the season calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEvent {
    pub round: Option<u32>,
    pub name: String,
    pub circuit: Option<String>,
    pub country: Option<String>,
    /// ISO date (YYYY-MM-DD) of the race day
    pub date: Option<String>,
}

/// One classified finisher of a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub round: Option<u32>,
    pub event: Option<String>,
    pub position: Option<u32>,
    pub driver: Option<String>,
    /// Three-letter driver abbreviation (e.g. VER)
    pub code: Option<String>,
    pub team: Option<String>,
    pub laps: Option<u32>,
    /// Finishing time, gap, or status text (e.g. "DNF")
    pub time: Option<String>,
    pub points: Option<f64>,
}

/// One row of the constructors' championship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub position: Option<u32>,
    pub team: String,
    pub points: Option<f64>,
    pub wins: Option<u32>,
}

/// One row of the drivers' championship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub position: Option<u32>,
    pub driver: String,
    pub code: Option<String>,
    pub nationality: Option<String>,
    pub team: Option<String>,
    pub points: Option<f64>,
}

/// A homogeneous list of records for one data kind.
///
/// Untagged so a `Records` value serializes as a plain JSON array, which is
/// what lands in the tool payload's `data` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Records {
    Calendar(Vec<RaceEvent>),
    Results(Vec<RaceResult>),
    TeamStandings(Vec<TeamStanding>),
    DriverStandings(Vec<DriverStanding>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::Calendar(v) => v.len(),
            Records::Results(v) => v.len(),
            Records::TeamStandings(v) => v.len(),
            Records::DriverStandings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
