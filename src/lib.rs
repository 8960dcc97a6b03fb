//! Pitwall - Formula 1 data over the Model Context Protocol
//!
//! Pitwall scrapes the public Formula 1 results archive into structured JSON
//! and exposes it as four MCP tools (calendar, race results, and the two
//! championship standings), with a year-fallback for not-yet-published
//! calendars and an in-process TTL cache.

pub mod error;
pub mod fetch;
pub mod format;
pub mod record;
pub mod scrape;
pub mod server;
pub mod tools;

pub use error::{PitwallError, Result};
