//! Upstream dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyRequest
//!     → Dispatcher::dispatch (the only network I/O boundary)
//!     → ProxyResponse (status, headers, fully buffered body)
//!     → handed to the rewriter
//! ```
//!
//! # Design Decisions
//! - Redirects are surfaced, never followed
//! - The dispatcher is a trait object so tests can swap in doubles
//! - Bodies are buffered; the rewriter needs the whole payload

pub mod client;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::error::ProxyResult;
use crate::translate::ProxyRequest;

pub use client::ReqwestDispatcher;

/// Issues a translated request against its upstream.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, request: &ProxyRequest) -> ProxyResult<ProxyResponse>;
}

/// Upstream response, rewritten in place before it reaches the client.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxyResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// The `Content-Type` header, or an empty string when absent or not ASCII.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// The `Location` header, when present and readable.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// True for any 3xx status.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
