//! Outbound header construction.
//!
//! # Rules
//! - `Host` and `Connection` are never copied from the inbound request
//! - `Host` is then set explicitly to the target domain
//! - Everything else, including `Cookie`, is copied with all its values

use axum::http::header::{CONNECTION, COOKIE, HOST};
use axum::http::{HeaderMap, HeaderValue, Uri};

use crate::error::{ProxyError, ProxyResult};

/// Build the header set for the upstream call.
pub fn forward_headers(inbound: &HeaderMap, target_domain: &str) -> ProxyResult<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);

    for (name, value) in inbound.iter() {
        if name == HOST || name == CONNECTION {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    let host = HeaderValue::from_str(target_domain)
        .map_err(|e| ProxyError::InvalidHeader(format!("Host '{}': {}", target_domain, e)))?;
    headers.insert(HOST, host);

    Ok(headers)
}

/// A single `name=value` pair from a `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Parse every `Cookie` header into name/value pairs, in order.
///
/// Non-UTF-8 headers and pairs without a name are skipped.
pub fn parse_cookies(headers: &HeaderMap) -> Vec<Cookie> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Cookie {
                name: name.to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Determine the host:port the client used to reach the proxy.
///
/// Uses the `Host` header, falling back to the URI authority (HTTP/2).
pub fn resolve_proxy_host(headers: &HeaderMap, uri: &Uri) -> ProxyResult<String> {
    if let Some(host) = headers.get(HOST).and_then(|v| v.to_str().ok()) {
        if !host.is_empty() {
            return Ok(host.to_string());
        }
    }

    uri.authority()
        .map(|a| a.as_str().to_string())
        .ok_or(ProxyError::MissingHost)
}
