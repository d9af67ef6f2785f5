use serde_json::Value;

use crate::error::StepError;
use crate::http::{ApiClient, ApiResponse, ClientSettings, Credentials};

/// `owner/name` pair read from a step table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// State for one scenario. A new `World` is built for every scenario, so
/// nothing leaks between them.
#[derive(Debug)]
pub struct World {
    pub(super) settings: ClientSettings,
    pub(super) credentials: Option<Credentials>,
    pub(super) client: Option<ApiClient>,
    pub(super) response: Option<ApiResponse>,
    pub(super) repositories: Option<Vec<RepositoryRef>>,
}

impl World {
    #[must_use]
    pub const fn new(settings: ClientSettings, credentials: Option<Credentials>) -> Self {
        Self {
            settings,
            credentials,
            client: None,
            response: None,
            repositories: None,
        }
    }

    /// The most recent response, if any request step has run.
    #[must_use]
    pub const fn last_response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn repositories(&self) -> Option<&[RepositoryRef]> {
        self.repositories.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    pub(super) fn response(&self) -> Result<&ApiResponse, StepError> {
        self.response.as_ref().ok_or(StepError::NoResponse)
    }

    pub(super) fn response_json(&self) -> Result<Value, StepError> {
        self.response()?
            .json()
            .map_err(|err| StepError::InvalidJson { source: err })
    }

    pub(super) fn client(&self) -> Result<&ApiClient, StepError> {
        self.client.as_ref().ok_or(StepError::NotAuthenticated)
    }

    pub(super) fn credentials(&self) -> Result<&Credentials, StepError> {
        self.credentials
            .as_ref()
            .ok_or(StepError::MissingCredentials)
    }

    pub(super) fn username(&self) -> Result<&str, StepError> {
        self.credentials().map(Credentials::username)
    }

    pub(super) fn record(&mut self, response: ApiResponse) {
        self.response = Some(response);
    }

    pub(super) fn expect_status(&self, expected: u16) -> Result<(), StepError> {
        let actual = self.response()?.status;
        if actual != expected {
            return Err(StepError::assertion(format!(
                "It didn't work. We expected a {} response code but got a {}",
                expected, actual
            )));
        }
        Ok(())
    }
}
