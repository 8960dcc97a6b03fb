//! Race result extraction
//!
//! Two structural markers on the results archive: the per-race links on the
//! season listing page (`/en/results/{year}/races/...`), and the
//! classification table (`table.resultsarchive-table`) on a race page. Column
//! meaning follows the archive layout — limiter, position, car number,
//! driver, car, laps, time/retired, points — but every cell is fetched with
//! `get()` so a short row still yields a record with nulls.

use scraper::Html;

use super::{RowExtractor, driver_cell, element_text, first_text, parse_points, parse_u32, selector};
use crate::error::{PitwallError, Result};
use crate::record::{RaceResult, Records};

const BASE_URL: &str = "https://www.formula1.com";

/// Per-race links on the season listing page, in source order (latest first).
///
/// Returns absolute URLs. An empty page (no links matching the marker) is a
/// parse failure: the listing structure we rely on is not there.
pub fn race_links(html: &str, year: u16) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let anchors = selector("a")?;
    let marker = format!("/en/results/{}/races/", year);

    let mut links = Vec::new();
    for anchor in document.select(&anchors) {
        let href = anchor.value().attr("href").unwrap_or("");
        if !href.contains(&marker) {
            continue;
        }
        let absolute = if href.starts_with('/') {
            format!("{}{}", BASE_URL, href)
        } else {
            href.to_string()
        };
        if !links.contains(&absolute) {
            links.push(absolute);
        }
    }

    if links.is_empty() {
        return Err(PitwallError::Parse(format!(
            "no race links found on the {} results listing",
            year
        )));
    }

    Ok(links)
}

pub struct RaceResultsExtractor {
    round: Option<u32>,
}

impl RaceResultsExtractor {
    pub fn new(round: Option<u32>) -> Self {
        Self { round }
    }
}

impl RowExtractor for RaceResultsExtractor {
    fn extract(&self, html: &str) -> Result<Records> {
        let document = Html::parse_document(html);

        let table_sel = selector("table.resultsarchive-table")?;
        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| PitwallError::Parse("results table not found".to_string()))?;

        // Race title, e.g. "Abu Dhabi Grand Prix 2023"
        let event = {
            let root = document.root_element();
            first_text(root, "h1.ResultsArchiveTitle")?.or(first_text(root, "h1")?)
        };

        let row_sel = selector("tbody tr")?;
        let cell_sel = selector("td")?;

        let mut results = Vec::new();
        for row in table.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.is_empty() {
                continue;
            }

            let (driver, code) = match cells.get(3) {
                Some(cell) => driver_cell(*cell)?,
                None => (None, None),
            };

            results.push(RaceResult {
                round: self.round,
                event: event.clone(),
                position: cells.get(1).map(|c| element_text(*c)).and_then(|t| parse_u32(&t)),
                driver,
                code,
                team: cells.get(4).map(|c| element_text(*c)).filter(|t| !t.is_empty()),
                laps: cells.get(5).map(|c| element_text(*c)).and_then(|t| parse_u32(&t)),
                time: cells.get(6).map(|c| element_text(*c)).filter(|t| !t.is_empty()),
                points: cells.get(7).map(|c| element_text(*c)).and_then(|t| parse_points(&t)),
            });
        }

        Ok(Records::Results(results))
    }
}
