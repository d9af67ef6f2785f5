use thiserror::Error;

use super::HttpError;

/// Failure raised by a single step.
///
/// `Assertion` is the ordinary "expected X but got Y" outcome; the other
/// variants describe a scenario that was written or wired incorrectly.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{message}")]
    Assertion { message: String },
    #[error("No authenticated client. Add 'Given I am an authenticated user' before this step.")]
    NotAuthenticated,
    #[error(
        "No credentials configured (set --username/--password, GITHUB_USERNAME/GITHUB_PASSWORD, or config username/password)."
    )]
    MissingCredentials,
    #[error("No response recorded yet. A request step must run before this assertion.")]
    NoResponse,
    #[error("No repositories recorded. Add 'Given I have the following repositories:' first.")]
    NoRepositoryTable,
    #[error("Step '{phrase}' requires a data table.")]
    MissingTable { phrase: &'static str },
    #[error("Table row {row} must have an owner and a repository column.")]
    ShortTableRow { row: usize },
    #[error("Step argument {index} is missing.")]
    MissingArgument { index: usize },
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Response body is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Response body is not {expected}.")]
    UnexpectedShape { expected: &'static str },
    #[error("Step phrase '{phrase}' does not compile: {source}")]
    InvalidPattern {
        phrase: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl StepError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}
