//! fetch_f1_race_results - classification of one race

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Tool, ToolResult, error_payload, run_fetch, year_param};
use crate::fetch::{Fetcher, Kind, Round};

pub struct RaceResultsTool;

#[async_trait]
impl Tool for RaceResultsTool {
    fn name(&self) -> &'static str {
        "fetch_f1_race_results"
    }

    fn description(&self) -> &'static str {
        "Fetch the full race classification for a Formula 1 season. Defaults \
         to the most recent completed race; pass 'round' to pick a specific \
         1-based round instead."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "year": {
                    "type": "string",
                    "description": "Season year, e.g. \"2023\""
                },
                "round": {
                    "type": "string",
                    "description": "Round number, or \"last\" for the most recent race (default)"
                }
            },
            "required": ["year"]
        })
    }

    async fn execute(&self, input: Value, fetcher: &Fetcher) -> ToolResult {
        let round = match input.get("round").and_then(Value::as_str) {
            Some(raw) => match Round::parse(raw) {
                Ok(round) => round,
                Err(err) => {
                    // Report the requested year even when the round is bad
                    let year = year_param(&input).ok();
                    return ToolResult::error(error_payload(&err, year.as_deref()));
                }
            },
            None => Round::Last,
        };

        run_fetch(fetcher, Kind::Results, &input, round).await
    }
}
