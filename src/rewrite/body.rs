//! Textual URL substitution for HTML, CSS and JavaScript payloads.
//!
//! This is literal substring replacement, not parsing. URLs split across
//! markup, built by script at runtime, or written in relative form are not
//! rewritten. Any other text that happens to contain the target domain after
//! `//` is rewritten too.

use bytes::Bytes;

/// Content-type fragments that mark a body as rewritable (case-sensitive).
const REWRITABLE_CONTENT_TYPES: [&str; 3] = ["text/html", "text/css", "javascript"];

/// Whether a body with this content type is rewritten.
pub fn is_rewritable(content_type: &str) -> bool {
    REWRITABLE_CONTENT_TYPES
        .iter()
        .any(|marker| content_type.contains(marker))
}

/// Point every absolute or protocol-relative reference to `target_domain`
/// back at the proxy.
///
/// Substitutions run in order, each over the output of the previous one:
/// `https://{target}`, then `http://{target}`, then `//{target}`.
pub fn substitute_urls(text: &str, target_domain: &str, proxy_host: &str, proxy_scheme: &str) -> String {
    let proxied = format!("{}://{}/{}", proxy_scheme, proxy_host, target_domain);

    text.replace(&format!("https://{}", target_domain), &proxied)
        .replace(&format!("http://{}", target_domain), &proxied)
        .replace(
            &format!("//{}", target_domain),
            &format!("//{}/{}", proxy_host, target_domain),
        )
}

/// Rewrite a textual body.
///
/// Returns `None` when the body is not valid UTF-8; the caller keeps the
/// original bytes.
pub fn rewrite_body(body: &Bytes, target_domain: &str, proxy_host: &str, proxy_scheme: &str) -> Option<Bytes> {
    match std::str::from_utf8(body) {
        Ok(text) => Some(Bytes::from(substitute_urls(text, target_domain, proxy_host, proxy_scheme))),
        Err(e) => {
            tracing::debug!(error = %e, "Body is not valid UTF-8, skipping rewrite");
            None
        }
    }
}
