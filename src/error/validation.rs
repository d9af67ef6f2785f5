use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Tag filter must not be empty.")]
    EmptyTag,
    #[error("Invalid tag filter '{value}'. Tags look like '@name' or '~@name'.")]
    InvalidTag { value: String },
    #[error("Invalid boolean '{value}'. Use true/false, yes/no, on/off or 1/0.")]
    InvalidBoolean { value: String },
    #[error("{failed} scenario(s) failed and {undefined} had undefined steps.")]
    ScenariosFailed { failed: usize, undefined: usize },
    #[error("No scenarios matched the given filters.")]
    NoScenariosMatched,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
