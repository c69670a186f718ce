//! Environment variable overrides.
//!
//! Variables recognised:
//! - `PORT`: listening port
//! - `PROXY_API_KEY`: shared credential secret
//! - `ALLOWED_HOSTS`: comma-separated host allow-list
//! - `ALLOW_CORS`: `true` enables CORS headers
//! - `CONNECT_TIMEOUT_SECS`, `UPSTREAM_TIMEOUT_SECS`: upstream timeouts
//! - `REQUEST_TIMEOUT_SECS`: whole inbound request timeout
//! - `METRICS_ADDRESS`: enables the Prometheus endpoint on this address
//! - `LOG_LEVEL`: default log level when `RUST_LOG` is unset

use std::str::FromStr;

use crate::config::loader::ConfigError;
use crate::config::schema::ProxyConfig;

/// Apply overrides from `lookup` (normally `std::env::var`) onto `config`.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = parse_var(&lookup, "PORT")? {
        config.listener.port = port;
    }

    if let Some(key) = lookup("PROXY_API_KEY") {
        config.auth.api_key = Some(key);
    }

    if let Some(hosts) = lookup("ALLOWED_HOSTS") {
        config.auth.allowed_hosts = parse_host_list(&hosts);
    }

    if let Some(cors) = lookup("ALLOW_CORS") {
        config.cors.enabled = cors == "true";
    }

    if let Some(secs) = parse_var(&lookup, "CONNECT_TIMEOUT_SECS")? {
        config.timeouts.connect_secs = secs;
    }

    if let Some(secs) = parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS")? {
        config.timeouts.upstream_secs = secs;
    }

    if let Some(secs) = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")? {
        config.timeouts.request_secs = secs;
    }

    if let Some(addr) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = addr;
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    Ok(())
}

/// Split a comma-separated host list, trimming entries and dropping empty ones.
pub fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { key, value }),
    }
}
