//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP server on stdio
//! - calendar: print the season schedule
//! - results: print a race classification
//! - drivers/teams: print championship standings

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pitwall - Formula 1 data as MCP tools and a terminal client
#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (the default)
    Serve,

    /// Print the race calendar for a season
    Calendar {
        /// Season year; defaults to the current year
        year: Option<String>,

        /// Print the raw JSON payload instead of formatted text
        #[arg(long)]
        json: bool,

        /// Bypass the in-process cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Print the classification of one race
    Results {
        /// Season year; defaults to the current year
        year: Option<String>,

        /// Round number, or "last" for the most recent race
        #[arg(short, long, default_value = "last")]
        round: String,

        /// Print the raw JSON payload instead of formatted text
        #[arg(long)]
        json: bool,

        /// Bypass the in-process cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Print the drivers' championship standings
    Drivers {
        /// Season year; defaults to the current year
        year: Option<String>,

        /// Print the raw JSON payload instead of formatted text
        #[arg(long)]
        json: bool,

        /// Bypass the in-process cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Print the constructors' championship standings
    Teams {
        /// Season year; defaults to the current year
        year: Option<String>,

        /// Print the raw JSON payload instead of formatted text
        #[arg(long)]
        json: bool,

        /// Bypass the in-process cache
        #[arg(long)]
        no_cache: bool,
    },
}
