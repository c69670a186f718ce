//! Access guard for the `/r` endpoint.
//!
//! Checks run in a fixed order and the first failure wins:
//! credential → target present → target parses → host allow-list.
//! No network activity happens before all four pass.

use std::fmt;
use url::Url;

use crate::config::AuthConfig;
use crate::error::ProxyError;
use crate::http::request::ProxyRequest;

/// A validated, absolute proxy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    url: Url,
}

impl ResolvedTarget {
    /// Parse an absolute URL of any scheme.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(|url| Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Hostname used for allow-list checks; empty for hostless URLs.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Validates credentials and targets against the startup configuration.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    api_key: Option<String>,
    allowed_hosts: Vec<String>,
}

impl AccessGuard {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            allowed_hosts: config.allowed_hosts.clone(),
        }
    }

    /// Authorize a request, returning its parsed target.
    pub fn authorize(&self, request: &ProxyRequest) -> Result<ResolvedTarget, ProxyError> {
        let authorized = match (&self.api_key, request.credential.as_deref()) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        };
        if !authorized {
            return Err(ProxyError::Unauthorized);
        }

        let raw = match request.target_url.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(ProxyError::MissingParameter),
        };

        let target = ResolvedTarget::parse(raw)?;

        if !self.host_allowed(target.hostname()) {
            return Err(ProxyError::HostNotAllowed(target.hostname().to_string()));
        }

        Ok(target)
    }

    /// Exact, case-sensitive match; an empty list allows every host.
    pub fn host_allowed(&self, hostname: &str) -> bool {
        self.allowed_hosts.is_empty() || self.allowed_hosts.iter().any(|h| h == hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(allowed: &[&str]) -> AccessGuard {
        AccessGuard::new(&AuthConfig {
            api_key: Some("secret".into()),
            allowed_hosts: allowed.iter().map(|h| h.to_string()).collect(),
        })
    }

    fn request(credential: Option<&str>, url: Option<&str>) -> ProxyRequest {
        ProxyRequest {
            credential: credential.map(str::to_string),
            target_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_credential_checked_first() {
        let guard = guard(&["example.com"]);

        for req in [
            request(None, Some("http://example.com/")),
            request(Some("wrong"), Some("http://example.com/")),
            request(Some("wrong"), None),
            request(Some("wrong"), Some("not a url")),
            request(Some("wrong"), Some("http://other.com/")),
            request(Some(""), Some("http://example.com/")),
        ] {
            assert!(matches!(guard.authorize(&req), Err(ProxyError::Unauthorized)));
        }
    }

    #[test]
    fn test_unset_secret_rejects_everything() {
        let guard = AccessGuard::new(&AuthConfig::default());
        let req = request(None, Some("http://example.com/"));
        assert!(matches!(guard.authorize(&req), Err(ProxyError::Unauthorized)));
    }

    #[test]
    fn test_missing_target() {
        let guard = guard(&[]);
        assert!(matches!(
            guard.authorize(&request(Some("secret"), None)),
            Err(ProxyError::MissingParameter)
        ));
        assert!(matches!(
            guard.authorize(&request(Some("secret"), Some(""))),
            Err(ProxyError::MissingParameter)
        ));
    }

    #[test]
    fn test_invalid_target() {
        let guard = guard(&["example.com"]);
        for raw in ["not a url", "/relative/path", "http://"] {
            assert!(
                matches!(
                    guard.authorize(&request(Some("secret"), Some(raw))),
                    Err(ProxyError::InvalidUrl(_))
                ),
                "{raw} should be invalid"
            );
        }
    }

    #[test]
    fn test_allow_list() {
        let guard = guard(&["example.com"]);

        let ok = guard
            .authorize(&request(Some("secret"), Some("http://example.com/page")))
            .unwrap();
        assert_eq!(ok.url().as_str(), "http://example.com/page");

        assert!(matches!(
            guard.authorize(&request(Some("secret"), Some("http://other.com/page"))),
            Err(ProxyError::HostNotAllowed(host)) if host == "other.com"
        ));
    }

    #[test]
    fn test_empty_allow_list_permits_any_scheme() {
        let guard = guard(&[]);
        for raw in ["https://anything.example/", "ftp://files.example/a", "mailto:x@y.z"] {
            assert!(guard.authorize(&request(Some("secret"), Some(raw))).is_ok());
        }
    }

    #[test]
    fn test_hostless_target_blocked_by_allow_list() {
        let guard = guard(&["example.com"]);
        assert!(matches!(
            guard.authorize(&request(Some("secret"), Some("mailto:x@example.com"))),
            Err(ProxyError::HostNotAllowed(_))
        ));
    }
}
