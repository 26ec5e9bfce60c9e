//! Timeout enforcement.
//!
//! Every upstream call runs under a deadline, whatever the dispatcher
//! implementation does internally. Expiry maps to [`ProxyError::Timeout`].
//! There are no retries.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{ProxyError, ProxyResult};

/// Await `fut`, failing with `Timeout` once `secs` have elapsed.
pub async fn with_deadline<T, F>(secs: u64, fut: F) -> ProxyResult<T>
where
    F: Future<Output = ProxyResult<T>>,
{
    match timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Timeout(secs)),
    }
}
