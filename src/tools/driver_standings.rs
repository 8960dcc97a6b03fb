//! fetch_f1_driver_standings - drivers' championship table

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolResult, run_fetch, year_schema};
use crate::fetch::{Fetcher, Kind, Round};

pub struct DriverStandingsTool;

#[async_trait]
impl Tool for DriverStandingsTool {
    fn name(&self) -> &'static str {
        "fetch_f1_driver_standings"
    }

    fn description(&self) -> &'static str {
        "Fetch the Formula 1 drivers' championship standings for a year: \
         position, driver, code, nationality, team, and points per row."
    }

    fn input_schema(&self) -> Value {
        year_schema()
    }

    async fn execute(&self, input: Value, fetcher: &Fetcher) -> ToolResult {
        run_fetch(fetcher, Kind::DriverStandings, &input, Round::Last).await
    }
}
