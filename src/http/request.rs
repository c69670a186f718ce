//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Extract the proxy parameters (`api_key`, `url`) from the query string
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parsing never rejects: malformed or duplicate parameters are
//!   resolved here so the access guard alone decides the status code

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Parameters of a `/r` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequest {
    /// The `api_key` query parameter.
    pub credential: Option<String>,
    /// The `url` query parameter.
    pub target_url: Option<String>,
}

impl ProxyRequest {
    /// Parse from a raw query string. The first occurrence of a parameter wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut request = Self::default();
        let Some(query) = query else {
            return request;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "api_key" if request.credential.is_none() => {
                    request.credential = Some(value.into_owned());
                }
                "url" if request.target_url.is_none() => {
                    request.target_url = Some(value.into_owned());
                }
                _ => {}
            }
        }
        request
    }
}
