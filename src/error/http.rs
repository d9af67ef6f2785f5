use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join URL '{path}': {source}")]
    JoinUrlFailed {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Credentials cannot be sent as a header: {source}")]
    InvalidCredentialHeader {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} failed: {source}")]
    RequestFailed {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body from {url}: {source}")]
    ReadBodyFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
