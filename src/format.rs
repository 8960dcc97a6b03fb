//! Terminal rendering for the CLI subcommands
//!
//! Pure string builders over the record types; the caller decides where the
//! text goes. Color is limited to status markers and headers so `--json`
//! output stays untouched.

use chrono::NaiveDate;
use colored::Colorize;

use crate::record::{DriverStanding, RaceEvent, RaceResult, TeamStanding};

const RULE_WIDTH: usize = 50;

/// Season calendar, one line per round, with a completion marker derived
/// from `today`
pub fn format_calendar(
    events: &[RaceEvent],
    year_used: u16,
    year_requested: u16,
    today: NaiveDate,
) -> String {
    let mut out = String::new();

    if year_used != year_requested {
        out.push_str(&format!(
            "{}\n",
            format!(
                "NOTE: no published calendar for {}, showing {} instead.",
                year_requested, year_used
            )
            .yellow()
        ));
    }
    out.push_str(&format!(
        "{}\n",
        format!("Formula 1 {} Season Calendar:", year_used).bold()
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for event in events {
        let round = event
            .round
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        let date = event.date.as_deref().unwrap_or("date TBD");
        let country = event.country.as_deref().unwrap_or("location TBD");

        let status = match event
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            Some(d) if d < today => format!(" {}", "[Completed]".dimmed()),
            Some(d) if d == today => format!(" {}", "[Today]".green()),
            Some(_) => format!(" {}", "[Upcoming]".cyan()),
            None => String::new(),
        };

        out.push_str(&format!(
            "Round {}: {} - {} ({}){}\n",
            round, date, event.name, country, status
        ));
    }

    out
}

/// Top three finishers of one race
pub fn format_podium(results: &[RaceResult]) -> String {
    if results.is_empty() {
        return "No race results data available".to_string();
    }

    let event = results[0].event.as_deref().unwrap_or("Unknown race");
    let mut out = format!("{}\n", format!("{} Podium:", event).bold());

    for row in results.iter().take(3) {
        let position = row
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());
        let driver = row.driver.as_deref().unwrap_or("Unknown driver");
        let team = row.team.as_deref().unwrap_or("Unknown team");
        let points = row.points.unwrap_or(0.0);
        out.push_str(&format!(
            "{}. {} ({}) - {} points\n",
            position, driver, team, points
        ));
    }

    out
}

/// Drivers' championship, capped at the top ten
pub fn format_driver_standings(standings: &[DriverStanding], year: u16) -> String {
    if standings.is_empty() {
        return "No driver standings data available".to_string();
    }

    let mut out = format!(
        "{}\n",
        format!("{} Driver Championship Standings:", year).bold()
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for row in standings.iter().take(10) {
        let position = row
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());
        let team = row.team.as_deref().unwrap_or("Unknown team");
        let points = row.points.unwrap_or(0.0);
        out.push_str(&format!(
            "{}. {} - {} points ({})\n",
            position, row.driver, points, team
        ));
    }

    out
}

/// Constructors' championship, full table
pub fn format_team_standings(standings: &[TeamStanding], year: u16) -> String {
    if standings.is_empty() {
        return "No constructor standings data available".to_string();
    }

    let mut out = format!(
        "{}\n",
        format!("{} Constructor Championship Standings:", year).bold()
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for row in standings {
        let position = row
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());
        let points = row.points.unwrap_or(0.0);
        out.push_str(&format!("{}. {} - {} points\n", position, row.team, points));
    }

    out
}
