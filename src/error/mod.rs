mod app;
mod config;
mod feature;
mod http;
mod report;
mod step;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use feature::FeatureError;
pub use http::HttpError;
pub use report::ReportError;
pub use step::StepError;
pub use validation::ValidationError;
