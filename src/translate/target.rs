//! Target decomposition.
//!
//! The inbound path `/{domain}/{rest}` names the upstream: the first segment
//! is the domain, everything after it is the upstream path. Path and query
//! are carried verbatim (still percent-encoded).

use axum::http::Uri;

use crate::error::{ProxyError, ProxyResult};

/// Scheme used for every upstream call, regardless of how the proxy was reached.
pub const UPSTREAM_SCHEME: &str = "https";

/// Target of a proxied request, decoded from the inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
    domain: String,
    path: String,
    query: Option<String>,
}

impl TargetPath {
    /// Decompose an inbound URI into (domain, path, query).
    ///
    /// Fails with [`ProxyError::MalformedPath`] when the first segment is empty.
    pub fn parse(uri: &Uri) -> ProxyResult<Self> {
        let full = uri.path();
        let full = full.strip_prefix('/').unwrap_or(full);

        let (domain, path) = full.split_once('/').unwrap_or((full, ""));
        if domain.is_empty() {
            return Err(ProxyError::MalformedPath);
        }

        Ok(Self {
            domain: domain.to_string(),
            path: path.to_string(),
            query: uri.query().map(str::to_string),
        })
    }

    /// Target domain (may include a port).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Upstream path without its leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Absolute upstream URL: `https://{domain}/{path}[?{query}]`.
    pub fn upstream_url(&self) -> String {
        let mut url = format!("{}://{}/{}", UPSTREAM_SCHEME, self.domain, self.path);
        if let Some(query) = &self.query {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}
