use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use chrono::{Datelike, Utc};
use cli::Cli;
use cli::commands::Commands;
use config::Config;
use pitwall::fetch::{Fetcher, FetcherConfig, Kind, Round};
use pitwall::format;
use pitwall::record::Records;
use pitwall::server::McpServer;
use std::time::Duration;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pitwall")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("pitwall.log");

    // Setup env_logger with file output; stdout stays clean for MCP traffic
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_fetcher(config: &Config, no_cache: bool) -> Result<Fetcher> {
    let mut fetcher_config: FetcherConfig = config.fetcher_config();
    if no_cache {
        fetcher_config.cache_ttl = Duration::ZERO;
    }
    Ok(Fetcher::new(fetcher_config)?)
}

fn resolve_year(year: Option<String>) -> String {
    year.unwrap_or_else(|| Utc::now().year().to_string())
}

async fn run_application(cli: Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match cli.command {
        // Default: serve MCP on stdio
        None | Some(Commands::Serve) => {
            let fetcher = build_fetcher(config, false)?;
            McpServer::new(fetcher).run().await?;
            Ok(())
        }
        Some(Commands::Calendar { year, json, no_cache }) => {
            handle_calendar(config, year, json, no_cache).await
        }
        Some(Commands::Results { year, round, json, no_cache }) => {
            handle_results(config, year, &round, json, no_cache).await
        }
        Some(Commands::Drivers { year, json, no_cache }) => {
            handle_drivers(config, year, json, no_cache).await
        }
        Some(Commands::Teams { year, json, no_cache }) => {
            handle_teams(config, year, json, no_cache).await
        }
    }
}

async fn handle_calendar(
    config: &Config,
    year: Option<String>,
    json: bool,
    no_cache: bool,
) -> Result<()> {
    let year = resolve_year(year);
    info!("Fetching calendar for {}", year);

    let fetcher = build_fetcher(config, no_cache)?;
    let outcome = fetcher.fetch(Kind::Calendar, &year).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.into_payload())?);
        return Ok(());
    }

    if let Records::Calendar(events) = &outcome.records {
        let text = format::format_calendar(
            events,
            outcome.year_used,
            outcome.year_requested,
            Utc::now().date_naive(),
        );
        println!("{}", text);
    }
    Ok(())
}

async fn handle_results(
    config: &Config,
    year: Option<String>,
    round: &str,
    json: bool,
    no_cache: bool,
) -> Result<()> {
    let year = resolve_year(year);
    let round = Round::parse(round)?;
    info!("Fetching race results for {} ({:?})", year, round);

    let fetcher = build_fetcher(config, no_cache)?;
    let outcome = fetcher.fetch_with_round(Kind::Results, &year, round).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.into_payload())?);
        return Ok(());
    }

    if let Records::Results(results) = &outcome.records {
        println!("{}", format::format_podium(results));
    }
    Ok(())
}

async fn handle_drivers(
    config: &Config,
    year: Option<String>,
    json: bool,
    no_cache: bool,
) -> Result<()> {
    let year = resolve_year(year);
    info!("Fetching driver standings for {}", year);

    let fetcher = build_fetcher(config, no_cache)?;
    let outcome = fetcher.fetch(Kind::DriverStandings, &year).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.into_payload())?);
        return Ok(());
    }

    if let Records::DriverStandings(standings) = &outcome.records {
        println!("{}", format::format_driver_standings(standings, outcome.year_used));
    }
    Ok(())
}

async fn handle_teams(
    config: &Config,
    year: Option<String>,
    json: bool,
    no_cache: bool,
) -> Result<()> {
    let year = resolve_year(year);
    info!("Fetching team standings for {}", year);

    let fetcher = build_fetcher(config, no_cache)?;
    let outcome = fetcher.fetch(Kind::TeamStandings, &year).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.into_payload())?);
        return Ok(());
    }

    if let Records::TeamStandings(standings) = &outcome.records {
        println!("{}", format::format_team_standings(standings, outcome.year_used));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(cli, &config).await.context("Application failed")?;

    Ok(())
}
