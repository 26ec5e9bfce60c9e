//! Request translation subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (parts + buffered body)
//!     → target.rs (path → domain, upstream path, query)
//!     → headers.rs (drop Host/Connection, set Host, parse cookies)
//!     → RequestContext (target domain + proxy host, per request)
//!     → ProxyRequest (immutable, handed to the dispatcher)
//! ```
//!
//! # Design Decisions
//! - The target domain travels in a per-request context, never in shared state
//! - No validation beyond a non-empty first segment; bad domains fail upstream

pub mod headers;
pub mod target;

use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};
use bytes::Bytes;

use crate::error::ProxyResult;

pub use headers::{forward_headers, parse_cookies, resolve_proxy_host, Cookie};
pub use target::{TargetPath, UPSTREAM_SCHEME};

/// Values the response rewriter needs to route URLs back through the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    target_domain: String,
    proxy_host: String,
}

impl RequestContext {
    pub fn new(target_domain: impl Into<String>, proxy_host: impl Into<String>) -> Self {
        Self {
            target_domain: target_domain.into(),
            proxy_host: proxy_host.into(),
        }
    }

    pub fn target_domain(&self) -> &str {
        &self.target_domain
    }

    pub fn proxy_host(&self) -> &str {
        &self.proxy_host
    }
}

/// Outbound request, built once from the inbound request.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    method: Method,
    target: TargetPath,
    headers: HeaderMap,
    body: Bytes,
    cookies: Vec<Cookie>,
}

impl ProxyRequest {
    /// Build the outbound request from inbound request parts and body.
    pub fn from_parts(parts: &Parts, body: Bytes) -> ProxyResult<Self> {
        let target = TargetPath::parse(&parts.uri)?;
        let headers = forward_headers(&parts.headers, target.domain())?;
        let cookies = parse_cookies(&parts.headers);

        Ok(Self {
            method: parts.method.clone(),
            target,
            headers,
            body,
            cookies,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &TargetPath {
        &self.target
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Cookies sent by the client. They travel upstream inside the
    /// forwarded `Cookie` header, unmodified.
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn upstream_url(&self) -> String {
        self.target.upstream_url()
    }
}

/// Translate an inbound request into its context and outbound request.
pub fn translate(parts: &Parts, body: Bytes) -> ProxyResult<(RequestContext, ProxyRequest)> {
    let request = ProxyRequest::from_parts(parts, body)?;
    let proxy_host = resolve_proxy_host(&parts.headers, &parts.uri)?;
    let context = RequestContext::new(request.target().domain(), proxy_host);

    Ok((context, request))
}
