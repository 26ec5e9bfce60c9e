//! Path-addressed forwarding proxy library.
//!
//! `GET http://proxy/{domain}/{path}` is forwarded to `https://{domain}/{path}`,
//! and the response is rewritten so links and redirects lead back through the proxy.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rewrite;
pub mod translate;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use translate::{ProxyRequest, RequestContext};
pub use upstream::{Dispatcher, ProxyResponse};
