//! Errors raised while proxying a single request.
//!
//! Every variant is converted into a plain-text response by the top-level
//! handler. Only path and host problems are the client's fault (400); the
//! rest surface as 500 with the message in the body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while translating, dispatching or rewriting a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound path has no target domain segment.
    #[error("missing target domain in request path")]
    MalformedPath,

    /// Neither a Host header nor a URI authority identifies the proxy.
    #[error("missing Host header")]
    MissingHost,

    /// A header value could not be constructed.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The inbound body could not be read (or exceeded the size limit).
    #[error("failed to read request body: {0}")]
    RequestBody(String),

    /// The upstream could not be reached or answered with a broken response.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The upstream call did not complete within the deadline.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),
}

impl ProxyError {
    /// Status code reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MalformedPath | ProxyError::MissingHost => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Proxy Error: {}", self),
        )
            .into_response()
    }
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
