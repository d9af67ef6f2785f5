use thiserror::Error;

use super::{ConfigError, FeatureError, HttpError, ReportError, StepError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Step error: {0}")]
    Step(#[from] StepError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn feature<E>(error: E) -> Self
    where
        E: Into<FeatureError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn step<E>(error: E) -> Self
    where
        E: Into<StepError>,
    {
        error.into().into()
    }

    pub fn report<E>(error: E) -> Self
    where
        E: Into<ReportError>,
    {
        error.into().into()
    }
}
