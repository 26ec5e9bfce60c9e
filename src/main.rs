//! path-proxy
//!
//! A forwarding proxy addressed by path, built with Tokio, Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────────┐
//!   GET /example.com/a  │  ┌───────────┐   ┌───────────┐   ┌─────────────┐  │
//!  ─────────────────────┼─▶│   http    │──▶│ translate │──▶│  upstream   │──┼──▶ https://example.com/a
//!                       │  │  server   │   │ (context) │   │ (reqwest)   │  │
//!                       │  └───────────┘   └───────────┘   └──────┬──────┘  │
//!                       │                                         │         │
//!   rewritten response  │  ┌───────────┐                          │         │
//!  ◀────────────────────┼──│  rewrite  │◀─────────────────────────┘         │
//!                       │  │ redirect  │                                    │
//!                       │  │ headers   │                                    │
//!                       │  │ body      │                                    │
//!                       │  └───────────┘                                    │
//!                       │                                                   │
//!                       │  config · observability · resilience · lifecycle  │
//!                       └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use path_proxy::http::HttpServer;
use path_proxy::lifecycle::{signals, startup, Shutdown};
use path_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "path-proxy")]
#[command(about = "Forward /{domain}/{path} to https://{domain}/{path} and rewrite the response", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g., 127.0.0.1:5000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(cli.config.as_deref(), cli.bind.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("path-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.upstream.request_timeout_secs,
        outbound_proxy = config.outbound_proxy.is_enabled(),
        proxy_scheme = %config.rewrite.proxy_scheme,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Access format: http://{{proxy-host}}/{{target-domain}}/{{path}}"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
