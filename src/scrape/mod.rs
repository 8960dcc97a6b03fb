//! HTML row extraction
//!
//! Markup-locating logic lives behind `RowExtractor`, one implementation per
//! data kind, so a source-format change touches one file. Extractors locate
//! content by structural markers (table classes, href prefixes), never by
//! absolute position, and coerce cells defensively: a missing or malformed
//! cell becomes `None`, not a dropped row.

mod calendar;
mod results;
mod standings;

pub use calendar::CalendarExtractor;
pub use results::{RaceResultsExtractor, race_links};
pub use standings::{DriverStandingsExtractor, TeamStandingsExtractor};

use scraper::{ElementRef, Selector};

use crate::error::{PitwallError, Result};
use crate::record::Records;

/// Parses one page of markup into a homogeneous record list.
///
/// `Err(Parse)` means the structural markers were not found at all; a page
/// with markers but zero rows is `Ok` with an empty list (the fetcher decides
/// whether that triggers year fallback).
pub trait RowExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<Records>;
}

/// Compile a CSS selector, mapping the (static) failure into our error type
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PitwallError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// All text under an element, whitespace-collapsed
pub(crate) fn element_text(element: ElementRef) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first descendant matching `css`, if any
pub(crate) fn first_text(element: ElementRef, css: &str) -> Result<Option<String>> {
    let sel = selector(css)?;
    Ok(element
        .select(&sel)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty()))
}

/// Coerce a cell to an integer; "NC", "DQ", "-" and friends become None
pub(crate) fn parse_u32(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Coerce a points cell; fractional points are real (half-points races)
pub(crate) fn parse_points(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Split a driver cell into (full name, three-letter code).
///
/// The source renders driver names as responsive spans: first name in
/// `hide-for-tablet`, surname in `hide-for-mobile`, and the abbreviation in
/// `hide-for-desktop`. Falls back to the whole cell text when the spans are
/// absent.
pub(crate) fn driver_cell(cell: ElementRef) -> Result<(Option<String>, Option<String>)> {
    let first = first_text(cell, "span.hide-for-tablet")?;
    let last = first_text(cell, "span.hide-for-mobile")?;
    let code = first_text(cell, "span.hide-for-desktop")?;

    let name = match (first, last) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(f), None) => Some(f),
        (None, Some(l)) => Some(l),
        (None, None) => {
            let whole = element_text(cell);
            if whole.is_empty() { None } else { Some(whole) }
        }
    };

    Ok((name, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_element(html: &str, css: &str) -> Option<String> {
        let doc = Html::parse_fragment(html);
        let sel = selector(css).unwrap();
        doc.select(&sel).next().map(element_text)
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = "<table><tr><td>  Lewis\n   Hamilton </td></tr></table>";
        let text = first_element(html, "td").unwrap();
        assert_eq!(text, "Lewis Hamilton");
    }

    #[test]
    fn test_parse_u32_rejects_status_text() {
        assert_eq!(parse_u32("18"), Some(18));
        assert_eq!(parse_u32(" 3 "), Some(3));
        assert_eq!(parse_u32("NC"), None);
        assert_eq!(parse_u32("DQ"), None);
        assert_eq!(parse_u32(""), None);
    }

    #[test]
    fn test_parse_points_handles_fractions() {
        assert_eq!(parse_points("25"), Some(25.0));
        assert_eq!(parse_points("12.5"), Some(12.5));
        assert_eq!(parse_points("-"), None);
    }

    #[test]
    fn test_driver_cell_with_spans() {
        // A bare <td> gets dropped by the HTML5 tree builder
        let html = "<table><tr><td><span class=\"hide-for-tablet\">Max</span>\
                    <span class=\"hide-for-mobile\">Verstappen</span>\
                    <span class=\"hide-for-desktop\">VER</span></td></tr></table>";
        let doc = Html::parse_fragment(html);
        let sel = selector("td").unwrap();
        let cell = doc.select(&sel).next().unwrap();

        let (name, code) = driver_cell(cell).unwrap();
        assert_eq!(name.as_deref(), Some("Max Verstappen"));
        assert_eq!(code.as_deref(), Some("VER"));
    }

    #[test]
    fn test_driver_cell_falls_back_to_plain_text() {
        let doc = Html::parse_fragment("<table><tr><td>Ayrton Senna</td></tr></table>");
        let sel = selector("td").unwrap();
        let cell = doc.select(&sel).next().unwrap();

        let (name, code) = driver_cell(cell).unwrap();
        assert_eq!(name.as_deref(), Some("Ayrton Senna"));
        assert_eq!(code, None);
    }

    #[test]
    fn test_selector_rejects_garbage() {
        assert!(selector("td[").is_err());
    }
}
