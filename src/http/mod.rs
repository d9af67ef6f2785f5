//! HTTP client for the remote repository-hosting API.
mod auth;
mod client;
mod response;

#[cfg(test)]
mod tests;

pub use auth::Credentials;
pub use client::{ApiClient, ClientSettings, HttpMethod};
pub use response::ApiResponse;

#[cfg(test)]
pub(crate) use auth::basic_auth_header;
