//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, security headers, CORS)
//! - Bind server to listener
//! - Dispatch `/r` requests through the access guard and rewrite pipeline
//! - Observability (metrics, correlation IDs)

use axum::{
    extract::{RawQuery, State},
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::ServerError;
use crate::http::request::{MakeRequestUuidV4, ProxyRequest};
use crate::observability::metrics;
use crate::rewrite::{RewritePipeline, PROXY_PATH};
use crate::security::cors::cors_middleware;
use crate::security::headers::security_headers_middleware;
use crate::security::AccessGuard;
use crate::upstream::UpstreamClient;

/// Body of the liveness route.
pub const LIVENESS_MESSAGE: &str = "Proxy running";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<AccessGuard>,
    pub pipeline: Arc<RewritePipeline>,
}

/// HTTP server for the link-rewriting proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let client = UpstreamClient::new(&config.timeouts)?;

        let state = AppState {
            guard: Arc::new(AccessGuard::new(&config.auth)),
            pipeline: Arc::new(RewritePipeline::new(client)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut proxy_routes = Router::new().route(
            PROXY_PATH,
            get(proxy_handler).options(preflight_handler),
        );
        if config.cors.enabled {
            proxy_routes = proxy_routes.route_layer(middleware::from_fn(cors_middleware));
        }

        let mut router = Router::new()
            .route("/", get(liveness_handler))
            .merge(proxy_routes)
            .with_state(state);

        if config.security.enable_headers {
            router = router.layer(middleware::from_fn(security_headers_middleware));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// The fully layered router, for serving or driving directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cors = self.config.cors.enabled,
            allowed_hosts = ?self.config.auth.allowed_hosts,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

async fn liveness_handler() -> &'static str {
    LIVENESS_MESSAGE
}

async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Main proxy handler: guard, then fetch and rewrite.
async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request = ProxyRequest::from_query(query.as_deref());

    let target = match state.guard.authorize(&request) {
        Ok(target) => target,
        Err(e) => {
            tracing::debug!(error = %e, "Request rejected");
            let response = e.into_response();
            metrics::record_request(&method, response.status(), "rejected", start_time);
            return response;
        }
    };

    let credential = request.credential.as_deref().unwrap_or_default();
    match state.pipeline.proxy(&target, credential).await {
        Ok(proxied) => {
            let outcome = proxied.outcome();
            let response = proxied.into_response();
            metrics::record_request(&method, response.status(), outcome, start_time);
            response
        }
        Err(e) => {
            let response = e.into_response();
            metrics::record_request(&method, response.status(), "upstream_error", start_time);
            response
        }
    }
}
