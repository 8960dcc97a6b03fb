//! fetch_f1_calendar - season schedule for a year

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolResult, run_fetch, year_schema};
use crate::fetch::{Fetcher, Kind, Round};

pub struct CalendarTool;

#[async_trait]
impl Tool for CalendarTool {
    fn name(&self) -> &'static str {
        "fetch_f1_calendar"
    }

    fn description(&self) -> &'static str {
        "Fetch the Formula 1 race calendar for a year. Falls back to the \
         nearest earlier season when the requested year has no published \
         calendar; the payload's 'year' field names the season served."
    }

    fn input_schema(&self) -> Value {
        year_schema()
    }

    async fn execute(&self, input: Value, fetcher: &Fetcher) -> ToolResult {
        run_fetch(fetcher, Kind::Calendar, &input, Round::Last).await
    }
}
