use std::time::Duration;

use crate::config::parse_duration_value;
use crate::error::{AppError, AppResult, ValidationError};
use crate::runner::TagFilter;

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::config)
}

pub(crate) fn parse_tag_filter(s: &str) -> Result<TagFilter, ValidationError> {
    s.parse()
}
