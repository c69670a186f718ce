//! Error types for the proxy.
//!
//! `ProxyError` is the per-request taxonomy surfaced on `/r`; its HTTP
//! mapping lives in `http::response`. `ServerError` covers process-level
//! failures while starting or serving.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failure of a single `/r` request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Missing or wrong `api_key`.
    #[error("unauthorized")]
    Unauthorized,

    /// No `url` query parameter, or an empty one.
    #[error("missing url parameter")]
    MissingParameter,

    /// The target could not be parsed as an absolute URL.
    #[error("invalid target url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The target host is outside the configured allow-list.
    #[error("target host {0:?} not allowed")]
    HostNotAllowed(String),

    /// The upstream could not be reached or did not answer in time.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(#[from] UpstreamError),

    /// The HTML rewriter rejected the document.
    #[error("html rewrite failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

/// Error starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
