//! Season calendar extraction
//!
//! The racing listing page renders one anchor card per race. Cards are located
//! by their href prefix (`/en/racing/{year}/`), and the interesting lines are
//! recognized by shape: a `ROUND n` label, a date range like `14 - 16 Mar`,
//! and an official `... GRAND PRIX ...` title. The circuit only appears on the
//! per-race subpages, which are not fetched, so it stays `null`.

use scraper::Html;

use super::{RowExtractor, selector};
use crate::error::{PitwallError, Result};
use crate::record::{RaceEvent, Records};

const MONTHS: [(&str, u32); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

pub struct CalendarExtractor {
    year: u16,
}

impl CalendarExtractor {
    pub fn new(year: u16) -> Self {
        Self { year }
    }
}

impl RowExtractor for CalendarExtractor {
    fn extract(&self, html: &str) -> Result<Records> {
        let document = Html::parse_document(html);
        let anchors = selector("a")?;
        let prefix = format!("/en/racing/{}/", self.year);

        let mut events = Vec::new();
        for anchor in document.select(&anchors) {
            let href = anchor.value().attr("href").unwrap_or("");
            if !href.starts_with(&prefix) && !href.contains(&format!("formula1.com{}", prefix)) {
                continue;
            }

            let lines: Vec<String> = anchor
                .text()
                .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|t| !t.is_empty())
                .collect();
            if lines.is_empty() {
                continue;
            }

            if let Some(event) = parse_card(&lines, self.year) {
                // Some pages repeat the same card in multiple carousels
                if !events.iter().any(|e: &RaceEvent| e.round == event.round && e.name == event.name) {
                    events.push(event);
                }
            }
        }

        if events.is_empty() {
            // Distinguish "page exists but has no race cards" from an empty
            // season: with no anchors under the year prefix at all, the
            // structure we rely on is simply not there.
            return Err(PitwallError::Parse(format!(
                "no race cards found for {} (href prefix {})",
                self.year, prefix
            )));
        }

        events.sort_by_key(|e| e.round.unwrap_or(u32::MAX));
        Ok(Records::Calendar(events))
    }
}

fn parse_card(lines: &[String], year: u16) -> Option<RaceEvent> {
    let mut round = None;
    let mut date = None;
    let mut name = None;
    let mut country = None;

    for line in lines {
        let upper = line.to_uppercase();
        if upper.starts_with("ROUND") {
            round = upper
                .trim_start_matches("ROUND")
                .trim()
                .parse::<u32>()
                .ok();
        } else if upper.contains("GRAND PRIX") {
            name = Some(line.clone());
        } else if date.is_none() && line.len() < 20 {
            if let Some(iso) = parse_date_range(line, year) {
                date = Some(iso);
                continue;
            }
            if country.is_none() {
                country = Some(line.clone());
            }
        } else if country.is_none() {
            country = Some(line.clone());
        }
    }

    let name = match (name, &country) {
        (Some(n), _) => n,
        (None, Some(c)) => format!("{} Grand Prix", c),
        (None, None) => return None,
    };

    Some(RaceEvent {
        round,
        name,
        circuit: None,
        country,
        date,
    })
}

/// Turn a listing date range like "14 - 16 Mar", "14-16 Mar", or
/// "29 Feb - 2 Mar" into the ISO date of the race day (the final day).
fn parse_date_range(text: &str, year: u16) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let month_index = tokens
        .iter()
        .rposition(|t| month_number(t).is_some())?;
    let month = month_number(tokens[month_index])?;

    // The race day is the last number before the final month token, possibly
    // glued into a "14-16" range.
    let day_token = tokens[..month_index]
        .iter()
        .rev()
        .find(|t| t.chars().any(|c| c.is_ascii_digit()))?;
    let day: u32 = day_token.rsplit('-').next()?.trim().parse().ok()?;
    if day == 0 || day > 31 {
        return None;
    }

    Some(format!("{}-{:02}-{:02}", year, month, day))
}

fn month_number(token: &str) -> Option<u32> {
    let key = token.to_uppercase();
    let key = key.get(..3)?;
    MONTHS.iter().find(|(m, _)| *m == key).map(|(_, n)| *n)
}
