//! `Location` rewriting for intercepted redirects.
//!
//! # Rules
//! - Absolute (`http…`): `/{host[:port]}{path}[?{query}]`, any host
//! - Protocol-relative (`//host/path`): `/host/path`
//! - Host-relative (`/path`): `/{target_domain}/path`
//! - Path-relative (`next`): untouched; the browser resolves it against the
//!   proxied URL, which is already routed through the proxy
//!
//! The relative forms are only rewritten when enabled.

use url::Url;

/// Rewrite a `Location` value so the client's next request is proxied.
///
/// Returns `None` when the value should be passed through unchanged.
pub fn rewrite_location(location: &str, target_domain: &str, relative: bool) -> Option<String> {
    if location.starts_with("http") {
        return rewrite_absolute(location);
    }
    if !relative {
        return None;
    }

    if let Some(rest) = location.strip_prefix("//") {
        if rest.is_empty() {
            return None;
        }
        return Some(format!("/{}", rest));
    }
    if location.starts_with('/') {
        return Some(format!("/{}{}", target_domain, location));
    }
    None
}

fn rewrite_absolute(location: &str) -> Option<String> {
    let url = match Url::parse(location) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(location = %location, error = %e, "Unparseable redirect location, passing through");
            return None;
        }
    };
    let host = url.host_str()?;

    let mut rewritten = format!("/{}", host);
    if let Some(port) = url.port() {
        rewritten.push_str(&format!(":{}", port));
    }
    rewritten.push_str(url.path());
    if let Some(query) = url.query() {
        if !query.is_empty() {
            rewritten.push('?');
            rewritten.push_str(query);
        }
    }
    Some(rewritten)
}
