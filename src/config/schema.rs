//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream call policy (timeouts, body limits).
    pub upstream: UpstreamConfig,

    /// Optional intermediary for outbound calls.
    pub outbound_proxy: OutboundProxyConfig,

    /// Response rewriting behavior.
    pub rewrite: RewriteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Upstream call configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Total time allowed for one upstream call in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum inbound body size in bytes that will be buffered and forwarded.
    pub max_body_size: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Outbound intermediary, keyed by the scheme of the upstream URL.
///
/// Leave both empty to call upstreams directly.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutboundProxyConfig {
    /// Intermediary for `http://` upstream URLs (e.g., "http://10.0.0.1:8080").
    pub http: Option<String>,

    /// Intermediary for `https://` upstream URLs.
    pub https: Option<String>,
}

impl OutboundProxyConfig {
    /// Returns true if any intermediary is configured.
    pub fn is_enabled(&self) -> bool {
        self.http.is_some() || self.https.is_some()
    }
}

/// Response rewriting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Scheme used when building absolute URLs that point back at the proxy.
    pub proxy_scheme: String,

    /// Rewrite host-relative and protocol-relative `Location` values.
    pub relative_redirects: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            proxy_scheme: "http".to_string(),
            relative_redirects: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
