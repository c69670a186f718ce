//! Link-rewriting pipeline.
//!
//! # Data Flow
//! ```text
//! ResolvedTarget (from the access guard)
//!     → pipeline.rs (single upstream GET, classify by content-type)
//!         ├─ text/html → buffer body → html.rs (rewrite link attributes)
//!         │                               → links.rs (resolve + wrap as /r link)
//!         └─ anything else → stream upstream bytes through untouched
//!     → ProxyResponse
//! ```
//!
//! # Design Decisions
//! - One fetch attempt, no retries; any fetch failure is a 502
//! - A reference that fails to resolve is left as-is, never aborting the page
//! - CSS `url()` and inline script/style content are not rewritten

pub mod html;
pub mod links;
pub mod pipeline;

pub use html::{rewrite_document, RewrittenDocument};
pub use links::{proxy_link, PROXY_PATH};
pub use pipeline::{ProxyResponse, RewritePipeline};
