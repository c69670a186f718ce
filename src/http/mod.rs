//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routes)
//!     → request.rs (request ID, api_key/url extraction)
//!     → [access guard validates] → [rewrite pipeline fetches]
//!     → response.rs (status mapping, content-type, streaming body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, ProxyRequest, X_REQUEST_ID};
pub use response::HTML_CONTENT_TYPE;
pub use server::{HttpServer, LIVENESS_MESSAGE};
