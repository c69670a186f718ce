//! Proxy link construction.
//!
//! A proxy link routes a discovered reference back through `/r`:
//! `/r?url=<encoded absolute url>&api_key=<credential>`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Path of the proxy endpoint embedded in every rewritten link.
pub const PROXY_PATH: &str = "/r";

/// Characters left alone by ECMAScript `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the proxy link for an already-resolved absolute URL.
pub fn proxy_link(absolute: &Url, credential: &str) -> String {
    format!(
        "{PROXY_PATH}?url={}&api_key={}",
        encode_component(absolute.as_str()),
        encode_component(credential)
    )
}

/// Whether an attribute value names something fetchable over the network.
/// Empty values and `data:`/`javascript:` URIs are left as they are.
pub fn is_rewritable(value: &str) -> bool {
    !value.is_empty() && !value.starts_with("data:") && !value.starts_with("javascript:")
}

/// Resolve `value` against the page URL and wrap it as a proxy link.
///
/// Returns `None` when the value must stay untouched: either a skipped
/// scheme or a reference that does not resolve.
pub fn rewrite_reference(page: &Url, value: &str, credential: &str) -> Option<String> {
    if !is_rewritable(value) {
        return None;
    }

    match page.join(value) {
        Ok(absolute) => Some(proxy_link(&absolute, credential)),
        Err(e) => {
            tracing::debug!(reference = %value, error = %e, "Leaving unresolvable reference");
            None
        }
    }
}
