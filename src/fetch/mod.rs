//! Judge API client.
//!
//! Retrieves a user's contest history (`user.rating`) and submission log
//! (`user.status`) from a Codeforces-style REST API and unwraps the
//! `{status, comment, result}` response envelope. No caching, retries, or
//! rate limiting: each call either yields the full record list or fails.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::models::{ContestParticipation, Submission};

/// Errors that can occur while talking to the judge.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Judge rejected the request: {comment}")]
    Rejected { comment: String },

    #[error("Judge response carried no result payload")]
    MissingResult,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The judge's response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<Vec<T>>,
}

/// Unwrap an envelope into its record list.
///
/// A `FAILED` status or an absent `result` field is an upstream-data error;
/// an empty `result` list is a valid answer (a user with no history).
fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<Vec<T>, FetchError> {
    if envelope.status != "OK" {
        return Err(FetchError::Rejected {
            comment: envelope
                .comment
                .unwrap_or_else(|| "no comment supplied".to_string()),
        });
    }
    envelope.result.ok_or(FetchError::MissingResult)
}

/// Read-only view of the judge API.
///
/// Implemented by [`CodeforcesClient`] and by test doubles, so the API
/// layer never needs a live judge to be exercised.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Ordered contest-participation list for a handle.
    async fn user_rating(&self, handle: &str) -> Result<Vec<ContestParticipation>, FetchError>;

    /// Full submission log for a handle.
    async fn user_status(&self, handle: &str) -> Result<Vec<Submission>, FetchError>;
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the judge API
    pub base_url: Url,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://codeforces.com/api")
                .expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            user_agent: format!("cf-insight/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP implementation of [`JudgeClient`] against the Codeforces API.
pub struct CodeforcesClient {
    client: Client,
    base_url: Url,
}

impl CodeforcesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("cf-insight/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Build the URL for an API method, tolerating base URLs with or
    /// without a trailing slash.
    fn endpoint(&self, method: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(method);
        Ok(url)
    }

    /// Call one API method and unwrap the envelope.
    async fn get_result<T: DeserializeOwned>(
        &self,
        method: &str,
        handle: &str,
    ) -> Result<Vec<T>, FetchError> {
        let mut url = self.endpoint(method)?;
        url.query_pairs_mut().append_pair("handle", handle);

        info!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // The judge reports application errors (unknown handle, bad
        // parameters) as a FAILED envelope inside a 4xx response, so try
        // the envelope before giving up on the status code.
        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) => {
                debug!("{} returned envelope status {}", method, envelope.status);
                unwrap_envelope(envelope)
            }
            Err(err) if status.is_success() => Err(FetchError::Json(err)),
            Err(_) => Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }),
        }
    }
}

#[async_trait]
impl JudgeClient for CodeforcesClient {
    async fn user_rating(&self, handle: &str) -> Result<Vec<ContestParticipation>, FetchError> {
        self.get_result("user.rating", handle).await
    }

    async fn user_status(&self, handle: &str) -> Result<Vec<Submission>, FetchError> {
        self.get_result("user.status", handle).await
    }
}
