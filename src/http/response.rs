//! Response construction.
//!
//! # Responsibilities
//! - Turn pipeline output into HTTP responses
//! - Map proxy errors to status codes and fixed plain-text bodies
//!
//! # Design Decisions
//! - Passthrough bodies stream, never buffered
//! - Upstream failure details stay in the logs; the caller only ever sees
//!   `Error fetching target`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;
use crate::rewrite::ProxyResponse;

/// Content type of every rewritten document.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

impl ProxyError {
    /// Status code and body surfaced to the caller.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ProxyError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ProxyError::MissingParameter => (StatusCode::BAD_REQUEST, "Missing url param"),
            ProxyError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL"),
            ProxyError::HostNotAllowed(_) => (StatusCode::FORBIDDEN, "Target host not allowed"),
            ProxyError::UpstreamFetch(_) | ProxyError::Rewrite(_) => {
                (StatusCode::BAD_GATEWAY, "Error fetching target")
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.status_and_message().into_response()
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        match self {
            ProxyResponse::Rewritten(html) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE))],
                html,
            )
                .into_response(),
            ProxyResponse::Passthrough {
                status,
                content_type,
                body,
            } => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        }
    }
}
