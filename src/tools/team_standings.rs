//! fetch_f1_team_standings - constructors' championship table

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolResult, run_fetch, year_schema};
use crate::fetch::{Fetcher, Kind, Round};

pub struct TeamStandingsTool;

#[async_trait]
impl Tool for TeamStandingsTool {
    fn name(&self) -> &'static str {
        "fetch_f1_team_standings"
    }

    fn description(&self) -> &'static str {
        "Fetch the Formula 1 constructors' championship standings for a year: \
         position, team, and points per row."
    }

    fn input_schema(&self) -> Value {
        year_schema()
    }

    async fn execute(&self, input: Value, fetcher: &Fetcher) -> ToolResult {
        run_fetch(fetcher, Kind::TeamStandings, &input, Round::Last).await
    }
}
