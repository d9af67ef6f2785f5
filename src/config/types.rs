use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Contents of `hubcheck.toml` / `hubcheck.json`.
///
/// `github_username` / `github_password` are accepted as aliases so existing
/// context parameter files can be reused.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    #[serde(alias = "github_username")]
    pub username: Option<String>,
    #[serde(alias = "github_password")]
    pub password: Option<String>,
    pub features: Option<String>,
    pub timeout: Option<DurationValue>,
    pub user_agent: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub stop_on_failure: Option<bool>,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(0) => Err(ConfigError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
