//! Fetcher: URL construction, HTTP, parsing, year fallback, caching
//!
//! `Fetcher::fetch(kind, year)` is the whole public contract: validate the
//! year, consult the cache, GET the kind-specific page, run the kind's row
//! extractor, and — for the calendar only — walk back up to a few earlier
//! years when the requested season has no data yet. The outcome is always
//! tagged with the year actually served and the full list of attempted years.

pub mod cache;
pub mod source;

pub use cache::{Cache, CacheKey, Clock, ManualClock, SystemClock};
pub use source::{HttpPageSource, MockPageSource, PageError, PageSource};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{PitwallError, Result};
use crate::record::Records;
use crate::scrape::{
    CalendarExtractor, DriverStandingsExtractor, RaceResultsExtractor, RowExtractor,
    TeamStandingsExtractor, race_links,
};

const BASE_URL: &str = "https://www.formula1.com";

/// First Formula 1 world championship season
pub const MIN_YEAR: u16 = 1950;

/// The four supported data kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Calendar,
    Results,
    TeamStandings,
    DriverStandings,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Calendar => "calendar",
            Kind::Results => "results",
            Kind::TeamStandings => "team_standings",
            Kind::DriverStandings => "driver_standings",
        }
    }

    /// Only the calendar falls back to earlier years; the source simply has
    /// no results or standings for a season that has not happened, and
    /// serving last year's standings as this year's would mislead.
    pub fn supports_fallback(&self) -> bool {
        matches!(self, Kind::Calendar)
    }

    /// Source URL for this kind and year
    pub fn url(&self, year: u16) -> String {
        match self {
            Kind::Calendar => format!("{}/en/racing/{}.html", BASE_URL, year),
            Kind::Results => format!("{}/en/results/{}/races.html", BASE_URL, year),
            Kind::TeamStandings => format!("{}/en/results/{}/team.html", BASE_URL, year),
            Kind::DriverStandings => format!("{}/en/results/{}/drivers.html", BASE_URL, year),
        }
    }

    fn extractor(&self, year: u16) -> Box<dyn RowExtractor> {
        match self {
            Kind::Calendar => Box::new(CalendarExtractor::new(year)),
            Kind::Results => Box::new(RaceResultsExtractor::new(None)),
            Kind::TeamStandings => Box::new(TeamStandingsExtractor),
            Kind::DriverStandings => Box::new(DriverStandingsExtractor),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round selection for race results: the latest completed race, or a
/// 1-based chronological round number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Round {
    #[default]
    Last,
    Number(u32),
}

impl Round {
    pub fn parse(raw: &str) -> Result<Round> {
        match raw.trim() {
            "" | "last" | "current" => Ok(Round::Last),
            n => n
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .map(Round::Number)
                .ok_or_else(|| {
                    PitwallError::Validation(format!(
                        "round '{}' is not 'last' or a positive number",
                        raw
                    ))
                }),
        }
    }
}

/// Result of a fetch, tagged with data provenance
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub kind: Kind,
    pub year_requested: u16,
    pub year_used: u16,
    /// Every year tried, in order, including the one that succeeded
    pub attempted_years: Vec<u16>,
    pub records: Records,
}

impl FetchOutcome {
    pub fn used_fallback(&self) -> bool {
        self.year_used != self.year_requested
    }

    /// The tool success payload
    pub fn into_payload(self) -> Value {
        json!({
            "year": self.year_used,
            "year_requested": self.year_requested,
            "attempted_years": self.attempted_years,
            "data": self.records,
        })
    }
}

/// Tunables for the fetcher, independent of the global config file
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub cache_ttl: Duration,
    pub max_fallback_years: u16,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: source::DEFAULT_TIMEOUT,
            user_agent: None,
            cache_ttl: Duration::from_secs(600),
            max_fallback_years: 3,
        }
    }
}

pub struct Fetcher {
    source: Arc<dyn PageSource>,
    cache: Cache,
    clock: Arc<dyn Clock>,
    max_fallback_years: u16,
}

impl Fetcher {
    /// Fetcher backed by a live HTTP client and the system clock
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let source = HttpPageSource::new(config.timeout, config.user_agent.as_deref())?;
        Ok(Self::with_source(
            Arc::new(source),
            Arc::new(SystemClock),
            config,
        ))
    }

    /// Test seam: any page source, any clock
    pub fn with_source(
        source: Arc<dyn PageSource>,
        clock: Arc<dyn Clock>,
        config: FetcherConfig,
    ) -> Self {
        Self {
            source,
            cache: Cache::new(config.cache_ttl),
            clock,
            max_fallback_years: config.max_fallback_years,
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Fetch one kind of data for one year (latest round for results)
    pub async fn fetch(&self, kind: Kind, year: &str) -> Result<FetchOutcome> {
        self.fetch_with_round(kind, year, Round::Last).await
    }

    /// Fetch with an explicit round selection (only meaningful for results)
    pub async fn fetch_with_round(
        &self,
        kind: Kind,
        year: &str,
        round: Round,
    ) -> Result<FetchOutcome> {
        let year_requested = self.validate_year(year)?;

        // An explicit results round gets its own cache slot; everything else
        // (including the floating "last" round) shares the per-year slot.
        let round_key = match (kind, round) {
            (Kind::Results, Round::Number(n)) => Some(n),
            _ => None,
        };

        let budget = if kind.supports_fallback() {
            self.max_fallback_years
        } else {
            0
        };

        let mut attempted = Vec::new();
        for step in 0..=budget {
            let Some(attempt_year) = year_requested.checked_sub(step) else {
                break;
            };
            if attempt_year < MIN_YEAR {
                break;
            }
            attempted.push(attempt_year);

            if let Some(records) = self
                .cache
                .get((kind, attempt_year, round_key), self.clock.now())
            {
                log::info!("serving {}/{} from cache", kind, attempt_year);
                return Ok(FetchOutcome {
                    kind,
                    year_requested,
                    year_used: attempt_year,
                    attempted_years: attempted,
                    records,
                });
            }

            match self.fetch_year(kind, attempt_year, round).await {
                Ok(records) if !records.is_empty() => {
                    self.cache
                        .put((kind, attempt_year, round_key), records.clone(), self.clock.now());
                    if attempt_year != year_requested {
                        log::warn!(
                            "no {} data for {}, serving {} instead",
                            kind,
                            year_requested,
                            attempt_year
                        );
                    }
                    return Ok(FetchOutcome {
                        kind,
                        year_requested,
                        year_used: attempt_year,
                        attempted_years: attempted,
                        records,
                    });
                }
                Ok(_) => {
                    log::info!("{}/{} parsed but has no rows", kind, attempt_year);
                }
                // Missing markers or a non-success status: the data is not
                // there, keep walking back (calendar only).
                Err(PitwallError::Parse(msg)) => {
                    log::info!("{}/{} unavailable: {}", kind, attempt_year, msg);
                }
                // Transport failures are a resilience problem, not missing
                // data; falling back to an earlier year would mislead.
                Err(e) => return Err(e),
            }
        }

        Err(PitwallError::Parse(format!(
            "no {} data found for {} (attempted years: {:?})",
            kind, year_requested, attempted
        )))
    }

    async fn fetch_year(&self, kind: Kind, year: u16, round: Round) -> Result<Records> {
        if kind == Kind::Results {
            return self.fetch_results(year, round).await;
        }

        let url = kind.url(year);
        let html = self.get_page(&url).await?;
        kind.extractor(year).extract(&html)
    }

    /// Results are two-step: the season listing names the race pages, then
    /// the selected round's classification table is parsed.
    async fn fetch_results(&self, year: u16, round: Round) -> Result<Records> {
        let listing_url = Kind::Results.url(year);
        let listing = self.get_page(&listing_url).await?;

        // Listing order is latest race first
        let links = race_links(&listing, year)?;
        let (round_number, race_url) = match round {
            Round::Last => (links.len() as u32, links[0].clone()),
            Round::Number(n) => {
                let index = links
                    .len()
                    .checked_sub(n as usize)
                    .ok_or_else(|| {
                        PitwallError::Validation(format!(
                            "round {} out of range, {} has {} races so far",
                            n,
                            year,
                            links.len()
                        ))
                    })?;
                (n, links[index].clone())
            }
        };

        let html = self.get_page(&race_url).await?;
        RaceResultsExtractor::new(Some(round_number)).extract(&html)
    }

    async fn get_page(&self, url: &str) -> Result<String> {
        log::info!("GET {}", url);
        self.source.get(url).await.map_err(|e| match e {
            PageError::Transport(_) => e.into_fetch_error(url),
            PageError::Unavailable(status) => {
                PitwallError::Parse(format!("{} answered with status {}", url, status))
            }
        })
    }

    /// Coerce and bounds-check the year before any network activity
    fn validate_year(&self, raw: &str) -> Result<u16> {
        let year: u16 = raw.trim().parse().map_err(|_| {
            PitwallError::Validation(format!("year '{}' is not a valid year", raw))
        })?;

        let max = self.current_year() + 1;
        if year < MIN_YEAR || year > max {
            return Err(PitwallError::Validation(format!(
                "year {} out of range ({}..={})",
                year, MIN_YEAR, max
            )));
        }
        Ok(year)
    }

    fn current_year(&self) -> u16 {
        let now: DateTime<Utc> = self.clock.now().into();
        now.year() as u16
    }
}
