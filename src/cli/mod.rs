//! CLI module for pitwall - command-line interface and subcommands.
//!
//! Provides the main entry point with the MCP `serve` mode and direct data
//! subcommands for the terminal.

pub mod commands;

pub use commands::Cli;
