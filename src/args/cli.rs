use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::runner::TagFilter;

use super::defaults::{DEFAULT_BASE_URL, DEFAULT_FEATURES_PATH, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_tag_filter};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print every step phrase the runner understands
    ListSteps,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run Gherkin acceptance scenarios against a GitHub-compatible REST API."
)]
pub struct RunArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Feature file or directory searched recursively for *.feature files
    #[arg(default_value = DEFAULT_FEATURES_PATH)]
    pub features: PathBuf,

    /// API root that request paths are joined to
    #[arg(long = "base-url", env = "HUBCHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Account used by steps that need an authenticated user
    #[arg(long, short = 'u', env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// Password or personal access token for the account
    #[arg(long, short = 'p', env = "GITHUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long, short = 't', default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[arg(long = "user-agent", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Only run scenarios whose name contains this text
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Only run scenarios tagged '@tag'; '~@tag' excludes (repeatable)
    #[arg(long = "tags", value_parser = parse_tag_filter)]
    pub tags: Vec<TagFilter>,

    /// Match steps against definitions without sending requests
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Stop after the first failed scenario
    #[arg(long = "stop-on-failure")]
    pub stop_on_failure: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Path to config file (TOML/JSON). Defaults to ./hubcheck.toml or ./hubcheck.json if present.
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by HUBCHECK_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
