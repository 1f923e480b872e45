//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Short fixed timeout and a zondep User-Agent
//! - Exponential backoff retry for transport-level failures only
//! - JSON bodies returned regardless of HTTP status, because the GitHub
//!   commits API reports both rate limiting and repository moves inside the
//!   response payload rather than through the status line alone

use crate::error::SourceError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Timeout for every upstream request (5 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("zondep/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transport failures
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with transport-level retry
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SourceError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request and parse the body as JSON
    ///
    /// The HTTP status is intentionally not turned into an error here: the
    /// indirection-following protocol inspects the body, and upstream encodes
    /// rate limiting and moved repositories in the payload. Transport errors
    /// are retried with exponential backoff; timeouts surface as
    /// [`SourceError::Timeout`], never as rate limiting.
    pub async fn get_json(&self, url: &str, dependency: &str) -> Result<Value, SourceError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => match response.json::<Value>().await {
                    Ok(body) => return Ok(body),
                    Err(e) => {
                        last_error = Some(SourceError::invalid_response(
                            dependency,
                            format!("failed to parse JSON: {}", e),
                        ));
                    }
                },
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(SourceError::timeout(dependency));
                    } else {
                        last_error = Some(SourceError::network_error(dependency, e.to_string()));
                    }
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error
            .unwrap_or_else(|| SourceError::network_error(dependency, "unknown error")))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("failed to create default HTTP client")
    }
}
