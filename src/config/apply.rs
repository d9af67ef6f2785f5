use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::RunArgs;
use crate::error::{AppError, AppResult};
use crate::runner::TagFilter;

use super::parse::parse_base_url;
use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// A value from the file is only used when the argument was neither given on
/// the command line nor taken from its environment variable.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(args: &mut RunArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_explicit(matches, "base_url")
        && let Some(base_url) = config.base_url.as_deref()
    {
        parse_base_url(base_url).map_err(AppError::config)?;
        args.base_url = base_url.trim().to_owned();
    }

    if !is_explicit(matches, "username")
        && let Some(username) = config.username.clone()
    {
        args.username = Some(username);
    }

    if !is_explicit(matches, "password")
        && let Some(password) = config.password.clone()
    {
        args.password = Some(password);
    }

    if !is_explicit(matches, "features")
        && let Some(features) = config.features.as_deref()
    {
        args.features = PathBuf::from(features);
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration().map_err(AppError::config)?;
    }

    if !is_explicit(matches, "user_agent")
        && let Some(user_agent) = config.user_agent.clone()
    {
        args.user_agent = user_agent;
    }

    if !is_explicit(matches, "name")
        && let Some(name) = config.name.clone()
    {
        args.name = Some(name);
    }

    if !is_explicit(matches, "tags")
        && let Some(tags) = config.tags.as_ref()
    {
        let mut parsed = Vec::with_capacity(tags.len());
        for tag in tags {
            parsed.push(tag.parse::<TagFilter>().map_err(AppError::validation)?);
        }
        args.tags = parsed;
    }

    if !is_explicit(matches, "stop_on_failure")
        && let Some(stop_on_failure) = config.stop_on_failure
    {
        args.stop_on_failure = stop_on_failure;
    }

    if !is_explicit(matches, "report")
        && let Some(report) = config.report.as_deref()
    {
        args.report = Some(PathBuf::from(report));
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
