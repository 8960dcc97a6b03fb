//! Tool layer
//!
//! Four named operations over the fetcher, each with a declared JSON schema.
//! No business logic lives here: a tool validates its `year` parameter, calls
//! the fetcher, and shapes the outcome into exactly one of two payloads —
//! success (`year`, `year_requested`, `attempted_years`, `data`) or error
//! (`error`, `year_requested`). Failures never escape as panics or raw
//! errors; the registry converts everything into the error payload.

mod calendar;
mod driver_standings;
mod race_results;
mod team_standings;

pub use calendar::CalendarTool;
pub use driver_standings::DriverStandingsTool;
pub use race_results::RaceResultsTool;
pub use team_standings::TeamStandingsTool;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::PitwallError;
use crate::fetch::{Fetcher, Kind, Round};

/// A callable operation exposed to MCP clients
#[async_trait]
pub trait Tool: Send + Sync {
    /// Operation name as declared to clients
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool; always returns a payload, never an unguarded error
    async fn execute(&self, input: Value, fetcher: &Fetcher) -> ToolResult;
}

/// Result from tool execution: one payload plus an error flag
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub payload: Value,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(payload: Value) -> Self {
        Self {
            payload,
            is_error: false,
        }
    }

    pub fn error(payload: Value) -> Self {
        Self {
            payload,
            is_error: true,
        }
    }
}

/// Tool definition as listed to clients
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Pull the `year` parameter out of a tool input; accepts a string (the
/// declared schema) or a bare number for lenient clients.
fn year_param(input: &Value) -> Result<String, PitwallError> {
    match input.get("year") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(PitwallError::Validation(format!(
            "year must be a string, got {}",
            other
        ))),
        None => Err(PitwallError::Validation(
            "missing required parameter 'year'".to_string(),
        )),
    }
}

/// The error payload: `{error, year_requested}` with a null year when the
/// input never parsed to one.
fn error_payload(err: &PitwallError, year_raw: Option<&str>) -> Value {
    let year_requested = year_raw.and_then(|y| y.trim().parse::<i64>().ok());
    json!({
        "error": err.to_string(),
        "year_requested": year_requested,
    })
}

/// Shared adapter body: validate the year parameter, fetch, shape the payload
async fn run_fetch(fetcher: &Fetcher, kind: Kind, input: &Value, round: Round) -> ToolResult {
    let year = match year_param(input) {
        Ok(year) => year,
        Err(err) => return ToolResult::error(error_payload(&err, None)),
    };

    match fetcher.fetch_with_round(kind, &year, round).await {
        Ok(outcome) => ToolResult::success(outcome.into_payload()),
        Err(err) => {
            log::warn!("{} for year {} failed: {}", kind, year, err);
            ToolResult::error(error_payload(&err, Some(&year)))
        }
    }
}

/// Dispatches tool calls by name
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with the four standard F1 tools
    pub fn standard() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.add_tool(Box::new(CalendarTool));
        registry.add_tool(Box::new(RaceResultsTool));
        registry.add_tool(Box::new(TeamStandingsTool));
        registry.add_tool(Box::new(DriverStandingsTool));
        registry
    }

    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions for `tools/list`, in stable name order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a named tool; an unknown name is an error payload, not a panic
    pub async fn execute(&self, name: &str, input: Value, fetcher: &Fetcher) -> ToolResult {
        match self.tools.get(name) {
            Some(tool) => tool.execute(input, fetcher).await,
            None => ToolResult::error(json!({
                "error": format!("unknown tool: {}", name),
                "year_requested": Value::Null,
            })),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// The uniform `{year: string}` schema shared by all four tools
pub(crate) fn year_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "year": {
                "type": "string",
                "description": "Season year, e.g. \"2023\""
            }
        },
        "required": ["year"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetcherConfig, ManualClock, MockPageSource};
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};

    fn test_fetcher(source: Arc<MockPageSource>) -> Fetcher {
        // 2023-11-14
        let clock = ManualClock::new(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        );
        Fetcher::with_source(source, Arc::new(clock), FetcherConfig::default())
    }

    #[test]
    fn test_standard_registry_has_all_four_tools() {
        let registry = ToolRegistry::standard();
        assert!(registry.has_tool("fetch_f1_calendar"));
        assert!(registry.has_tool("fetch_f1_race_results"));
        assert!(registry.has_tool("fetch_f1_team_standings"));
        assert!(registry.has_tool("fetch_f1_driver_standings"));
    }

    #[test]
    fn test_definitions_declare_year_everywhere() {
        let registry = ToolRegistry::standard();
        let defs = registry.definitions();
        assert_eq!(defs.len(), 4);
        for def in &defs {
            assert_eq!(def.input_schema["properties"]["year"]["type"], "string");
            assert!(
                def.input_schema["required"]
                    .as_array()
                    .unwrap()
                    .contains(&json!("year"))
            );
        }
    }

    #[test]
    fn test_year_param_accepts_string_and_number() {
        assert_eq!(year_param(&json!({"year": "2023"})).unwrap(), "2023");
        assert_eq!(year_param(&json!({"year": 2023})).unwrap(), "2023");
        assert!(year_param(&json!({})).is_err());
        assert!(year_param(&json!({"year": ["2023"]})).is_err());
    }

    #[test]
    fn test_error_payload_shape() {
        let err = PitwallError::Validation("year 1800 out of range".to_string());
        let payload = error_payload(&err, Some("1800"));
        assert_eq!(payload["year_requested"], 1800);
        assert!(payload["error"].as_str().unwrap().contains("1800"));

        let payload = error_payload(&err, Some("banana"));
        assert!(payload["year_requested"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_error_payload() {
        let registry = ToolRegistry::standard();
        let fetcher = test_fetcher(Arc::new(MockPageSource::new()));

        let result = registry
            .execute("fetch_f2_calendar", json!({"year": "2023"}), &fetcher)
            .await;
        assert!(result.is_error);
        assert!(
            result.payload["error"]
                .as_str()
                .unwrap()
                .contains("unknown tool")
        );
    }

    #[tokio::test]
    async fn test_missing_year_never_reaches_fetcher() {
        let source = Arc::new(MockPageSource::new());
        let fetcher = test_fetcher(Arc::clone(&source));
        let registry = ToolRegistry::standard();

        let result = registry
            .execute("fetch_f1_calendar", json!({}), &fetcher)
            .await;
        assert!(result.is_error);
        assert_eq!(source.call_count(), 0);
    }
}
