//! HTML link attribute rewriting.
//!
//! The rule set is a static table of tags and the link-bearing attributes
//! checked on each; one handler per `tag[attribute]` pair drives the same
//! rewrite routine.

use html_escape::decode_html_entities;
use lol_html::errors::RewritingError;
use lol_html::html_content::Element;
use lol_html::{element, rewrite_str, HandlerResult, RewriteStrSettings};
use std::cell::Cell;
use url::Url;

use crate::rewrite::links::rewrite_reference;

const LINK_ATTRIBUTES: &[&str] = &["href", "src", "action"];

/// Tags whose link attributes are routed back through the proxy.
pub const LINK_RULES: &[(&str, &[&str])] = &[
    ("a", LINK_ATTRIBUTES),
    ("img", LINK_ATTRIBUTES),
    ("script", LINK_ATTRIBUTES),
    ("link", LINK_ATTRIBUTES),
    ("iframe", LINK_ATTRIBUTES),
    ("form", LINK_ATTRIBUTES),
];

/// Result of rewriting one document.
#[derive(Debug)]
pub struct RewrittenDocument {
    /// Serialized HTML with proxy links substituted.
    pub html: String,
    /// Number of attributes that were replaced.
    pub rewritten_links: usize,
}

/// Rewrite every link attribute in `html`, resolving references against `page`.
pub fn rewrite_document(
    html: &str,
    page: &Url,
    credential: &str,
) -> Result<RewrittenDocument, RewritingError> {
    let rewritten = Cell::new(0usize);
    let counter = &rewritten;

    let mut handlers = Vec::new();
    for (tag, attributes) in LINK_RULES {
        for attribute in attributes.iter().copied() {
            let selector = format!("{tag}[{attribute}]");
            handlers.push(element!(selector, move |el| {
                rewrite_attribute(el, attribute, page, credential, counter)
            }));
        }
    }

    let html = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            // Ambiguous markup (e.g. `<iframe>` inside `<select>`) is still rewritten.
            strict: false,
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(RewrittenDocument {
        html,
        rewritten_links: rewritten.get(),
    })
}

fn rewrite_attribute(
    el: &mut Element<'_, '_>,
    attribute: &str,
    page: &Url,
    credential: &str,
    counter: &Cell<usize>,
) -> HandlerResult {
    let Some(value) = el.get_attribute(attribute) else {
        return Ok(());
    };

    // `get_attribute` returns the raw source text, character references included.
    let value = decode_html_entities(&value);

    if let Some(link) = rewrite_reference(page, &value, credential) {
        el.set_attribute(attribute, &link)?;
        counter.set(counter.get() + 1);
    }
    Ok(())
}
