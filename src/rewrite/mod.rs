//! Response rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyResponse from the dispatcher
//!     → headers.rs (drop Content-Encoding/Length, Transfer-Encoding, Connection)
//!     → 3xx with rewritable Location? redirect.rs → redirect back through proxy
//!     → otherwise, HTML/CSS/JS body? body.rs → substitute target URLs
//!     → ProxyResponse for the client
//! ```
//!
//! # Design Decisions
//! - Operates on a fully buffered body; nothing is sent before rewriting ends
//! - Invalid UTF-8 is never an error: the body passes through untouched
//! - A 3xx whose Location is left alone is treated like any other response

pub mod body;
pub mod headers;
pub mod redirect;

use axum::http::header::LOCATION;
use axum::http::HeaderValue;
use bytes::Bytes;

use crate::config::RewriteConfig;
use crate::observability::metrics;
use crate::translate::RequestContext;
use crate::upstream::ProxyResponse;

pub use body::{is_rewritable, rewrite_body, substitute_urls};
pub use headers::{strip_transport_headers, EXCLUDED_RESPONSE_HEADERS};
pub use redirect::rewrite_location;

/// Transform an upstream response into the client-facing response.
pub fn rewrite_response(
    mut response: ProxyResponse,
    context: &RequestContext,
    config: &RewriteConfig,
) -> ProxyResponse {
    strip_transport_headers(&mut response.headers);

    if response.is_redirect() {
        if let Some(location) = intercept_redirect(&response, context, config) {
            tracing::info!(
                from = ?response.headers.get(LOCATION),
                to = ?location,
                status = %response.status,
                "Rewriting redirect"
            );
            metrics::record_redirect_rewritten(response.status.as_u16());

            response.headers.insert(LOCATION, location);
            response.body = Bytes::new();
            return response;
        }
    }

    if is_rewritable(response.content_type()) {
        if let Some(body) = rewrite_body(
            &response.body,
            context.target_domain(),
            context.proxy_host(),
            &config.proxy_scheme,
        ) {
            metrics::record_body_rewritten();
            response.body = body;
        }
    }

    response
}

fn intercept_redirect(
    response: &ProxyResponse,
    context: &RequestContext,
    config: &RewriteConfig,
) -> Option<HeaderValue> {
    let location = response.location()?;
    let rewritten = rewrite_location(location, context.target_domain(), config.relative_redirects)?;

    match HeaderValue::from_str(&rewritten) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(location = %rewritten, error = %e, "Rewritten location is not a valid header");
            None
        }
    }
}
