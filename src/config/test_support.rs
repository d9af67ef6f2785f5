use std::path::Path;

use clap::{CommandFactory, FromArgMatches};

use crate::args::RunArgs;
use crate::error::AppResult;

use super::loader;
use super::types::ConfigFile;

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    loader::load_config_file(path)
}

pub(crate) fn parse_cli(args: &[&str]) -> Result<(RunArgs, clap::ArgMatches), String> {
    let matches = RunArgs::command()
        .try_get_matches_from(args)
        .map_err(|err| format!("parse args failed: {}", err))?;
    let parsed =
        RunArgs::from_arg_matches(&matches).map_err(|err| format!("parse args failed: {}", err))?;
    Ok((parsed, matches))
}
