//! Link-rewriting forwarding proxy library.
//!
//! Fetches a target through `/r?url=...&api_key=...` and, for HTML, rewrites
//! every link-bearing attribute so that the browser keeps navigating through
//! the proxy.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;
pub mod security;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::{ProxyError, ServerError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
