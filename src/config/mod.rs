//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → env.rs (PORT, PROXY_API_KEY, ALLOWED_HOSTS, ALLOW_CORS, ...)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the access guard, pipeline and CORS layer
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::{
    AuthConfig, CorsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, SecurityConfig,
    TimeoutConfig,
};
