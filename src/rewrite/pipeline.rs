//! Fetch, classify and transform one proxied resource.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use futures_util::TryStreamExt;

use crate::error::ProxyError;
use crate::observability::metrics;
use crate::rewrite::html::rewrite_document;
use crate::security::access_guard::ResolvedTarget;
use crate::upstream::UpstreamClient;

/// What the pipeline hands back to the HTTP layer.
#[derive(Debug)]
pub enum ProxyResponse {
    /// Rewritten HTML, always served as `text/html; charset=utf-8` with 200.
    Rewritten(String),

    /// Upstream bytes relayed as they arrive.
    Passthrough {
        status: StatusCode,
        content_type: HeaderValue,
        body: Body,
    },
}

impl ProxyResponse {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyResponse::Rewritten(_) => "rewritten",
            ProxyResponse::Passthrough { .. } => "passthrough",
        }
    }
}

/// HTML media types are matched case-insensitively.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Performs the single upstream GET and the HTML/passthrough branch.
#[derive(Debug, Clone)]
pub struct RewritePipeline {
    client: UpstreamClient,
}

impl RewritePipeline {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Fetch `target` and either rewrite it or pass it through.
    ///
    /// `credential` is embedded in every rewritten link so that follow-up
    /// navigation through those links authenticates again.
    pub async fn proxy(
        &self,
        target: &ResolvedTarget,
        credential: &str,
    ) -> Result<ProxyResponse, ProxyError> {
        let deadline = self.client.deadline();
        let upstream = self.client.get(target.url(), deadline).await.inspect_err(|e| {
            tracing::error!(url = %target, error = %e, "Error fetching target");
        })?;

        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(""));
        let media_type = String::from_utf8_lossy(content_type.as_bytes()).into_owned();

        tracing::debug!(
            url = %target,
            status = %status,
            content_type = %media_type,
            "Upstream responded"
        );

        if !is_html(&media_type) {
            let url = target.to_string();
            let stream = upstream.bytes_stream().inspect_err(move |e| {
                tracing::warn!(url = %url, error = %e, "Upstream body stream failed");
            });
            return Ok(ProxyResponse::Passthrough {
                status,
                content_type,
                body: Body::from_stream(stream),
            });
        }

        let text = self.client.read_text(upstream, deadline).await.inspect_err(|e| {
            tracing::error!(url = %target, error = %e, "Error reading target body");
        })?;

        let document = rewrite_document(&text, target.url(), credential).inspect_err(|e| {
            tracing::error!(url = %target, error = %e, "Error rewriting target document");
        })?;

        metrics::record_rewritten_links(document.rewritten_links);
        tracing::debug!(
            url = %target,
            rewritten_links = document.rewritten_links,
            "Document rewritten"
        );

        Ok(ProxyResponse::Rewritten(document.html))
    }
}
