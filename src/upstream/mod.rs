//! Upstream fetch subsystem.
//!
//! # Responsibilities
//! - Own the single shared HTTP client (keep-alive pool only, no cache)
//! - Issue one GET per proxied request, no retries
//! - Bound the wait for response headers and for buffered HTML bodies
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities around reqwest futures
//! - Dropping the returned future or body stream cancels the upstream request,
//!   so a client disconnect never leaves a fetch running

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
