mod plan;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::RunArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses the command line, loads config and runs the selected features.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, feature files
/// cannot be loaded, or any selected scenario fails.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<(RunArgs, ArgMatches)> {
    let matches = RunArgs::command().get_matches();
    let args = RunArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: RunArgs, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(args, matches)?;
    execute_plan(plan).await
}
