//! Responses produced by the proxy itself.
//!
//! Upstream responses are shaped by the rewriter; this module only covers the
//! landing page and the fallback for a panicking handler.

use std::any::Any;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>path-proxy</title></head>
<body>
<h1>Proxy Server Running</h1>
<p>Usage: <code>http://{proxy-host}/{target-domain}/{path}</code></p>
<p>Example: <code>http://localhost:5000/www.example.com/docs/index.html</code></p>
</body>
</html>
"#;

/// Static informational page served at `/`.
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Convert a caught panic into the same 500 shape as any other failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(detail = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Proxy Error: {}", detail),
    )
        .into_response()
}
