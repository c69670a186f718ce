//! HTTP client used to reach proxy targets.

use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use url::Url;

use crate::config::TimeoutConfig;

const USER_AGENT: &str = concat!("link-proxy/", env!("CARGO_PKG_VERSION"));

/// Why an upstream fetch failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Thin wrapper around `reqwest::Client` with the proxy's timeout policy.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    response_timeout: Duration,
}

impl UpstreamClient {
    /// Build a client from the configured timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            response_timeout: Duration::from_secs(timeouts.upstream_secs),
        })
    }

    /// Deadline covering one whole fetch: response headers and, for
    /// buffered documents, the body read that follows.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.response_timeout
    }

    /// GET `target`, giving up on response headers at `deadline`.
    pub async fn get(&self, target: &Url, deadline: Instant) -> Result<Response, UpstreamError> {
        let send = self.http.get(target.clone()).send();
        match timeout_at(deadline, send).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(UpstreamError::Timeout(self.response_timeout)),
        }
    }

    /// Buffer the whole body as text, finishing before the same `deadline`.
    pub async fn read_text(
        &self,
        response: Response,
        deadline: Instant,
    ) -> Result<String, UpstreamError> {
        match timeout_at(deadline, response.text()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(UpstreamError::Timeout(self.response_timeout)),
        }
    }
}
