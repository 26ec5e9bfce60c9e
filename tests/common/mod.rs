//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use path_proxy::{Dispatcher, HttpServer, ProxyConfig, ProxyRequest, ProxyResponse, ProxyResult, Shutdown};

type Responder = Box<dyn Fn(&ProxyRequest) -> ProxyResponse + Send + Sync>;

/// Dispatcher double: records every request and answers from a closure.
pub struct StubDispatcher {
    respond: Responder,
    delay: Duration,
    seen: Mutex<Vec<ProxyRequest>>,
}

impl StubDispatcher {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&ProxyRequest) -> ProxyResponse + Send + Sync + 'static,
    {
        Self::with_delay(Duration::ZERO, respond)
    }

    /// Answer only after `delay`, to simulate a stalled upstream.
    pub fn with_delay<F>(delay: Duration, respond: F) -> Arc<Self>
    where
        F: Fn(&ProxyRequest) -> ProxyResponse + Send + Sync + 'static,
    {
        Arc::new(Self {
            respond: Box::new(respond),
            delay,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Requests dispatched so far, in order.
    pub fn requests(&self) -> Vec<ProxyRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatcher for StubDispatcher {
    async fn dispatch(&self, request: &ProxyRequest) -> ProxyResult<ProxyResponse> {
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok((self.respond)(request))
    }
}

/// Build an upstream response from static header pairs.
pub fn upstream_response(
    status: u16,
    headers: &[(&'static str, &'static str)],
    body: impl Into<bytes::Bytes>,
) -> ProxyResponse {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.append(*name, HeaderValue::from_static(*value));
    }
    ProxyResponse::new(StatusCode::from_u16(status).unwrap(), map, body)
}

/// Start the proxy on an ephemeral loopback port.
pub async fn start_proxy(config: ProxyConfig, dispatcher: Arc<dyn Dispatcher>) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_dispatcher(config, dispatcher);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that talks to the proxy directly and never follows redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
