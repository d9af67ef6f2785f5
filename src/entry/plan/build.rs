use clap::ArgMatches;

use crate::args::{Command, RunArgs};
use crate::config::parse_base_url;
use crate::error::{AppError, AppResult};
use crate::http::{ClientSettings, Credentials};
use crate::runner::{RunOptions, ScenarioFilter};

use super::types::{FeatureRun, RunPlan};

pub(crate) fn build_plan(args: RunArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(command) = args.command.as_ref() {
        match command {
            Command::ListSteps => return Ok(RunPlan::ListSteps),
        }
    }

    let args = apply_config(args, matches)?;
    parse_base_url(&args.base_url).map_err(AppError::config)?;

    let credentials = credentials(args.username, args.password);
    let settings =
        ClientSettings::new(&args.base_url, args.timeout, args.user_agent).map_err(AppError::http)?;

    Ok(RunPlan::Features(FeatureRun {
        features: args.features,
        settings,
        credentials,
        filter: ScenarioFilter {
            name: args.name,
            tags: args.tags,
        },
        options: RunOptions {
            dry_run: args.dry_run,
            stop_on_failure: args.stop_on_failure,
        },
        report: args.report,
    }))
}

fn apply_config(mut args: RunArgs, matches: &ArgMatches) -> AppResult<RunArgs> {
    let loaded_config = crate::config::load_config(args.config.as_deref())?;
    if let Some(config) = loaded_config {
        crate::config::apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

fn credentials(username: Option<String>, password: Option<String>) -> Option<Credentials> {
    match (username, password) {
        (Some(username), Some(password)) => Some(Credentials::new(username, password)),
        (None, None) => None,
        (Some(_), None) => {
            tracing::warn!("Username given without a password; authenticated steps will fail.");
            None
        }
        (None, Some(_)) => {
            tracing::warn!("Password given without a username; authenticated steps will fail.");
            None
        }
    }
}
