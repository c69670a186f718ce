//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_guard.rs (api_key, url presence/validity, host allow-list)
//!     → Pass to rewrite pipeline
//!
//! Outgoing response:
//!     → cors.rs (CORS triplet on /r, when enabled)
//!     → headers.rs (hardening headers on every response)
//! ```
//!
//! # Design Decisions
//! - Fail closed: an unset secret authorizes nothing
//! - Validation failures are caller errors and short-circuit before any fetch
//! - No trust in client input

pub mod access_guard;
pub mod cors;
pub mod headers;

pub use access_guard::{AccessGuard, ResolvedTarget};
