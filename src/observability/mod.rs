//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! translate / dispatch / rewrite produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request log line
//! - Metrics labels are low-cardinality: no target domains

pub mod logging;
pub mod metrics;
