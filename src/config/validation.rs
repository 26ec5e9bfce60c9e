//! Configuration validation.
//!
//! Serde handles syntax; this module checks values: addresses parse,
//! timeouts are positive, intermediary URLs are usable.
//! All problems are collected, not just the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "upstream.request_timeout_secs").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const PROXY_URL_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_secs", "must be greater than 0"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be greater than 0"));
    }
    if config.upstream.max_body_size == 0 {
        errors.push(ValidationError::new("upstream.max_body_size", "must be greater than 0"));
    }

    let intermediaries = [
        ("outbound_proxy.http", &config.outbound_proxy.http),
        ("outbound_proxy.https", &config.outbound_proxy.https),
    ];
    for (field, value) in intermediaries {
        if let Some(raw) = value {
            match url::Url::parse(raw) {
                Ok(parsed) if PROXY_URL_SCHEMES.contains(&parsed.scheme()) => {}
                Ok(parsed) => errors.push(ValidationError::new(
                    field,
                    format!("unsupported scheme '{}'", parsed.scheme()),
                )),
                Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", raw, e))),
            }
        }
    }

    if !matches!(config.rewrite.proxy_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::new(
            "rewrite.proxy_scheme",
            format!("must be 'http' or 'https', got '{}'", config.rewrite.proxy_scheme),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.request_timeout_secs = 0;
        config.rewrite.proxy_scheme = "ftp".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["listener.bind_address", "upstream.request_timeout_secs", "rewrite.proxy_scheme"]
        );
    }

    #[test]
    fn test_outbound_proxy_urls() {
        let mut config = ProxyConfig::default();
        config.outbound_proxy.http = Some("socks5h://127.0.0.1:9050".into());
        assert!(validate_config(&config).is_ok());

        config.outbound_proxy.https = Some("ftp://127.0.0.1:21".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "outbound_proxy.https");
        assert!(errors[0].message.contains("ftp"));

        config.outbound_proxy.https = Some("::nonsense".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].message.starts_with("invalid URL"));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ProxyConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
