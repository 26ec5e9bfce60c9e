//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (file or defaults)
//! - Apply command-line overrides
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Overrides are validated like file values

use std::path::Path;

use crate::config::loader::{load_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::ProxyConfig;

/// Build the effective configuration from an optional file and bind override.
pub fn resolve_config(path: Option<&Path>, bind_override: Option<&str>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}
