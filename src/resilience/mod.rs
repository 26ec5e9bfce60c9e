//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (deadline around the whole dispatch)
//!     → On expiry: ProxyError::Timeout → 500 to the client
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - No retries: a failed call is reported once, as is

pub mod timeouts;
