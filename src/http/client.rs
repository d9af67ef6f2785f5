use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::HttpError;

use super::auth::{Credentials, basic_auth_header};
use super::response::ApiResponse;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Settings shared by every client built for a run.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientSettings {
    /// Parses `base_url`, making sure it ends with `/` so relative paths keep
    /// any prefix (e.g. `https://ghe.example.com/api/v3/`).
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be parsed.
    pub fn new(base_url: &str, timeout: Duration, user_agent: String) -> Result<Self, HttpError> {
        let mut normalized = base_url.trim().to_owned();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let parsed = Url::parse(&normalized).map_err(|err| HttpError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
        Ok(Self {
            base_url: parsed,
            timeout,
            user_agent,
        })
    }
}

/// Thin client over `reqwest`. Non-2xx responses are returned, not raised.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    authenticated: bool,
}

impl ApiClient {
    /// Builds a client that sends no credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn anonymous(settings: &ClientSettings) -> Result<Self, HttpError> {
        Self::build(settings, None)
    }

    /// Builds a client that sends basic credentials with every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built or
    /// the credentials cannot form a header value.
    pub fn authenticated(
        settings: &ClientSettings,
        credentials: &Credentials,
    ) -> Result<Self, HttpError> {
        Self::build(settings, Some(credentials))
    }

    fn build(
        settings: &ClientSettings,
        credentials: Option<&Credentials>,
    ) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        if let Some(credentials) = credentials {
            let mut value = HeaderValue::from_str(&basic_auth_header(credentials))
                .map_err(|err| HttpError::InvalidCredentialHeader { source: err })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            authenticated: credentials.is_some(),
        })
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Resolves `path` against the base URL. Leading slashes are ignored so
    /// `/user/repos` and `user/repos` resolve the same way.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined URL is invalid.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| HttpError::JoinUrlFailed {
                path: path.to_owned(),
                source: err,
            })
    }

    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(path)?;
        self.send(HttpMethod::Get, url, None).await
    }

    /// `GET` with URL-encoded query pairs appended.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, HttpError> {
        let mut url = self.url_for(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        self.send(HttpMethod::Get, url, None).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(path)?;
        self.send(HttpMethod::Post, url, Some(body)).await
    }

    /// `PUT` with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn put(&self, path: &str) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(path)?;
        self.send(HttpMethod::Put, url, None).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn put_json(&self, path: &str, body: &Value) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(path)?;
        self.send(HttpMethod::Put, url, Some(body)).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(path)?;
        self.send(HttpMethod::Delete, url, None).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<&Value>,
    ) -> Result<ApiResponse, HttpError> {
        let url_text = url.to_string();
        let mut request = self.client.request(method.to_reqwest(), url);
        request = match body {
            Some(body) => request.json(body),
            None if method == HttpMethod::Put => {
                request.header(CONTENT_LENGTH, HeaderValue::from_static("0"))
            }
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| HttpError::RequestFailed {
                method: method.as_str(),
                url: url_text.clone(),
                source: err,
            })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| HttpError::ReadBodyFailed {
                url: url_text.clone(),
                source: err,
            })?;

        debug!(
            "{} {} -> {} ({} bytes, authenticated: {})",
            method.as_str(),
            url_text,
            status,
            text.len(),
            self.authenticated
        );

        Ok(ApiResponse::new(status, text))
    }
}
