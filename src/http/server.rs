//! HTTP server setup and the proxy pipeline.
//!
//! # Responsibilities
//! - Create the Axum router (landing page + proxied paths)
//! - Wire up middleware (request ID, tracing, panic recovery)
//! - Run each request through translate → dispatch → rewrite
//! - Convert every failure into a plain-text error response

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{get, on, MethodFilter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::{ProxyConfig, RewriteConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{landing_page, panic_response};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::rewrite::rewrite_response;
use crate::translate::translate;
use crate::upstream::{Dispatcher, ProxyResponse, ReqwestDispatcher};

/// Application state injected into handlers.
///
/// Everything here is read-only; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatcher>,
    pub rewrite: Arc<RewriteConfig>,
    pub timeout_secs: u64,
    pub max_body_size: usize,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that dispatches through a `reqwest` client.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let dispatcher = ReqwestDispatcher::new(&config.upstream, &config.outbound_proxy)?;
        Ok(Self::with_dispatcher(config, Arc::new(dispatcher)))
    }

    /// Create a server around any dispatcher implementation.
    pub fn with_dispatcher(config: ProxyConfig, dispatcher: Arc<dyn Dispatcher>) -> Self {
        let state = AppState {
            dispatcher,
            rewrite: Arc::new(config.rewrite.clone()),
            timeout_secs: config.upstream.request_timeout_secs,
            max_body_size: config.upstream.max_body_size,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let proxied = MethodFilter::GET
            .or(MethodFilter::POST)
            .or(MethodFilter::PUT)
            .or(MethodFilter::DELETE)
            .or(MethodFilter::PATCH);

        Router::new()
            .route("/", get(landing_page))
            .route("/{*path}", on(proxied, proxy_handler))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(self, listener: TcpListener, shutdown_rx: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            timeout_secs = self.config.upstream.request_timeout_secs,
            outbound_proxy = self.config.outbound_proxy.is_enabled(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler. Never fails: errors become plain-text responses.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let request_id = request_id(request.headers()).to_string();

    let response = match forward(&state, request, &request_id).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Proxy error");
            e.into_response()
        }
    };

    let status = response.status();
    metrics::record_request(method.as_str(), status.as_u16(), start_time);
    tracing::info!(
        request_id = %request_id,
        status = status.as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Response"
    );

    response
}

/// translate → dispatch (under deadline) → rewrite.
async fn forward(state: &AppState, request: Request<Body>, request_id: &str) -> ProxyResult<ProxyResponse> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, state.max_body_size)
        .await
        .map_err(|e| ProxyError::RequestBody(e.to_string()))?;

    let (context, outbound) = translate(&parts, body)?;

    tracing::info!(
        request_id = %request_id,
        method = %outbound.method(),
        target = %outbound.upstream_url(),
        "Proxying request"
    );

    let upstream = with_deadline(state.timeout_secs, state.dispatcher.dispatch(&outbound)).await?;

    tracing::debug!(
        request_id = %request_id,
        status = %upstream.status,
        content_type = %upstream.content_type(),
        "Upstream responded"
    );

    Ok(rewrite_response(upstream, &context, &state.rewrite))
}
