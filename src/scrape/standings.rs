//! Championship standings extraction
//!
//! Both standings pages use the same archive table class. Driver rows carry
//! the responsive name spans; team rows are plain text. The team table has no
//! wins column on the source site, so `wins` stays `null` unless an extra
//! numeric column shows up.

use scraper::Html;

use super::{RowExtractor, driver_cell, element_text, parse_points, parse_u32, selector};
use crate::error::{PitwallError, Result};
use crate::record::{DriverStanding, Records, TeamStanding};

pub struct DriverStandingsExtractor;

impl RowExtractor for DriverStandingsExtractor {
    fn extract(&self, html: &str) -> Result<Records> {
        let document = Html::parse_document(html);

        let table_sel = selector("table.resultsarchive-table")?;
        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| PitwallError::Parse("driver standings table not found".to_string()))?;

        let row_sel = selector("tbody tr")?;
        let cell_sel = selector("td")?;

        let mut standings = Vec::new();
        for row in table.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.is_empty() {
                continue;
            }

            let (driver, code) = match cells.get(2) {
                Some(cell) => driver_cell(*cell)?,
                None => (None, None),
            };

            standings.push(DriverStanding {
                position: cells.get(1).map(|c| element_text(*c)).and_then(|t| parse_u32(&t)),
                driver: driver.unwrap_or_default(),
                code,
                nationality: cells.get(3).map(|c| element_text(*c)).filter(|t| !t.is_empty()),
                team: cells.get(4).map(|c| element_text(*c)).filter(|t| !t.is_empty()),
                points: cells.get(5).map(|c| element_text(*c)).and_then(|t| parse_points(&t)),
            });
        }

        Ok(Records::DriverStandings(standings))
    }
}

pub struct TeamStandingsExtractor;

impl RowExtractor for TeamStandingsExtractor {
    fn extract(&self, html: &str) -> Result<Records> {
        let document = Html::parse_document(html);

        let table_sel = selector("table.resultsarchive-table")?;
        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| PitwallError::Parse("team standings table not found".to_string()))?;

        let row_sel = selector("tbody tr")?;
        let cell_sel = selector("td")?;

        let mut standings = Vec::new();
        for row in table.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.is_empty() {
                continue;
            }

            standings.push(TeamStanding {
                position: cells.get(1).map(|c| element_text(*c)).and_then(|t| parse_u32(&t)),
                team: cells
                    .get(2)
                    .map(|c| element_text(*c))
                    .unwrap_or_default(),
                points: cells.get(3).map(|c| element_text(*c)).and_then(|t| parse_points(&t)),
                wins: cells.get(4).map(|c| element_text(*c)).and_then(|t| parse_u32(&t)),
            });
        }

        Ok(Records::TeamStandings(standings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVERS_PAGE: &str = r#"<html><body>
    <table class="resultsarchive-table"><tbody>
      <tr>
        <td class="limiter"></td>
        <td>1</td>
        <td><span class="hide-for-tablet">Max</span><span class="hide-for-mobile">Verstappen</span><span class="hide-for-desktop">VER</span></td>
        <td>NED</td>
        <td>Red Bull Racing Honda RBPT</td>
        <td>575</td>
        <td class="limiter"></td>
      </tr>
      <tr>
        <td class="limiter"></td>
        <td>2</td>
        <td><span class="hide-for-tablet">Sergio</span><span class="hide-for-mobile">Perez</span><span class="hide-for-desktop">PER</span></td>
        <td>MEX</td>
      </tr>
    </tbody></table>
    </body></html>"#;

    const TEAMS_PAGE: &str = r#"<html><body>
    <table class="resultsarchive-table"><tbody>
      <tr><td class="limiter"></td><td>1</td><td>Red Bull Racing Honda RBPT</td><td>860</td></tr>
      <tr><td class="limiter"></td><td>2</td><td>Mercedes</td><td>409</td></tr>
    </tbody></table>
    </body></html>"#;

    #[test]
    fn test_extract_driver_standings() {
        let records = DriverStandingsExtractor.extract(DRIVERS_PAGE).unwrap();
        let Records::DriverStandings(standings) = records else {
            panic!("expected driver standings");
        };
        assert_eq!(standings.len(), 2);

        assert_eq!(standings[0].position, Some(1));
        assert_eq!(standings[0].driver, "Max Verstappen");
        assert_eq!(standings[0].code.as_deref(), Some("VER"));
        assert_eq!(standings[0].nationality.as_deref(), Some("NED"));
        assert_eq!(standings[0].team.as_deref(), Some("Red Bull Racing Honda RBPT"));
        assert_eq!(standings[0].points, Some(575.0));
    }

    #[test]
    fn test_driver_row_missing_cells_become_null() {
        let records = DriverStandingsExtractor.extract(DRIVERS_PAGE).unwrap();
        let Records::DriverStandings(standings) = records else {
            panic!("expected driver standings");
        };

        assert_eq!(standings[1].driver, "Sergio Perez");
        assert_eq!(standings[1].team, None);
        assert_eq!(standings[1].points, None);
    }

    #[test]
    fn test_extract_team_standings() {
        let records = TeamStandingsExtractor.extract(TEAMS_PAGE).unwrap();
        let Records::TeamStandings(standings) = records else {
            panic!("expected team standings");
        };
        assert_eq!(standings.len(), 2);

        assert_eq!(standings[0].position, Some(1));
        assert_eq!(standings[0].team, "Red Bull Racing Honda RBPT");
        assert_eq!(standings[0].points, Some(860.0));
        // The source table has no wins column
        assert_eq!(standings[0].wins, None);
    }

    #[test]
    fn test_missing_table_is_parse_error() {
        let err = DriverStandingsExtractor
            .extract("<html><body></body></html>")
            .unwrap_err();
        assert!(matches!(err, PitwallError::Parse(_)));

        let err = TeamStandingsExtractor
            .extract("<html><body></body></html>")
            .unwrap_err();
        assert!(matches!(err, PitwallError::Parse(_)));
    }
}
