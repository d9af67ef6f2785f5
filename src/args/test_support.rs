use clap::Parser;

use crate::error::{AppError, AppResult};

use super::RunArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<RunArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RunArgs::try_parse_from(args).map_err(AppError::from)
}
