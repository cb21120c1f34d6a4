//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cloak using clap.
//!
//! Exit codes: 0 success, 1 rejected request, 2 configuration error,
//! 3 engine failure, 4 engine timeout, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cloak - dataset anonymization service
#[derive(Parser, Debug)]
#[command(name = "cloak")]
#[command(version, about, long_about = None)]
#[command(author = "Cloak Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cloak.toml", env = "CLOAK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLOAK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a dataset according to its declared privacy policy
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Quantify the re-identification risk of a dataset without anonymizing it
    Assess(commands::assess::AssessArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
