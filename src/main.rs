//! Link-rewriting forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client                ┌──────────────────────────────────────────────────┐
//!   GET /r?url=&api_key=  │                      PROXY                        │
//!  ──────────────────────▶│  ┌────────────┐   ┌──────────────┐   ┌──────────┐ │      Upstream
//!                         │  │   access   │──▶│   upstream   │──▶│ classify │◀┼──────  site
//!                         │  │   guard    │   │  GET (timed) │   └────┬─────┘ │
//!                         │  └────────────┘   └──────────────┘        │       │
//!                         │                        text/html ┌────────┴─────┐ │
//!  ◀──────────────────────│                                  ▼              ▼ │
//!   rewritten HTML or     │                          ┌────────────┐ ┌────────┐│
//!   streamed bytes        │                          │ link       │ │ stream ││
//!                         │                          │ rewriting  │ │ through││
//!                         │                          └────────────┘ └────────┘│
//!                         │  cross-cutting: config · logging · metrics ·      │
//!                         │  security headers · CORS · request IDs            │
//!                         └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use link_proxy::config;
use link_proxy::lifecycle::{signals, Shutdown};
use link_proxy::observability::{logging, metrics};
use link_proxy::HttpServer;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "link-proxy", version, about = "Link-rewriting forwarding proxy")]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("link-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.listener.port,
        allowed_hosts = config.auth.allowed_hosts.len(),
        cors = config.cors.enabled,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );
    if config.auth.api_key.is_none() {
        tracing::warn!("PROXY_API_KEY is not set; every /r request will be rejected");
    }

    if let Some(addr) = config.observability.metrics_socket_addr()? {
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!("Proxy running on port {}", listener.local_addr()?.port());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            signals::wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
