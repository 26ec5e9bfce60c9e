//! `reqwest`-backed dispatcher.
//!
//! # Responsibilities
//! - Send the translated request with its method, headers and body
//! - Never follow redirects
//! - Route through the configured outbound intermediary, if any
//! - Bound every call by the request timeout
//! - Deliver decoded (decompressed) bodies, since `Content-Encoding` is dropped downstream

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::config::{OutboundProxyConfig, UpstreamConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::translate::ProxyRequest;
use crate::upstream::{Dispatcher, ProxyResponse};

/// Dispatcher that issues real HTTP(S) calls.
#[derive(Clone)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestDispatcher {
    /// Build the client once at startup from immutable configuration.
    pub fn new(upstream: &UpstreamConfig, outbound: &OutboundProxyConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(upstream.request_timeout_secs))
            .connect_timeout(Duration::from_secs(upstream.connect_timeout_secs));

        if outbound.is_enabled() {
            if let Some(url) = &outbound.http {
                builder = builder.proxy(reqwest::Proxy::http(url)?);
            }
            if let Some(url) = &outbound.https {
                builder = builder.proxy(reqwest::Proxy::https(url)?);
            }
            tracing::info!(
                http = ?outbound.http,
                https = ?outbound.https,
                "Outbound intermediary configured"
            );
        } else {
            // Only the configured intermediary is used; ignore *_PROXY env vars.
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            timeout_secs: upstream.request_timeout_secs,
        })
    }

    async fn send(&self, url: &str, request: &ProxyRequest) -> ProxyResult<ProxyResponse> {
        let response = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers().clone())
            .body(request.body().clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(ProxyResponse::new(status, headers, body))
    }

    fn map_error(&self, error: reqwest::Error) -> ProxyError {
        if error.is_timeout() {
            return ProxyError::Timeout(self.timeout_secs);
        }
        ProxyError::Upstream(error_chain(&error))
    }
}

#[async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: &ProxyRequest) -> ProxyResult<ProxyResponse> {
        self.send(&request.upstream_url(), request).await
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
