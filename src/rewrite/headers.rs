//! Transport header filtering.
//!
//! These headers describe the upstream wire transfer. Rewriting changes the
//! body length, and framing and encoding are recomputed by the serving layer,
//! so they are never copied to the client.

use axum::http::header::{CONNECTION, CONTENT_ENCODING, CONTENT_LENGTH, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderName};

/// Headers removed from every upstream response.
pub const EXCLUDED_RESPONSE_HEADERS: [HeaderName; 4] =
    [CONTENT_ENCODING, CONTENT_LENGTH, TRANSFER_ENCODING, CONNECTION];

/// Remove every value of every excluded header.
pub fn strip_transport_headers(headers: &mut HeaderMap) {
    for name in &EXCLUDED_RESPONSE_HEADERS {
        headers.remove(name);
    }
}
