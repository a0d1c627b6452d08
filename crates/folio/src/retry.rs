//! Retry policy for rate limited requests.

use folio_error::{FolioError, FolioResult, RetryableError};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Run `op`, retrying up to `max_retries` times with a fixed `delay` while it
/// fails with a retryable error.
///
/// Only rate limit rejections (HTTP 429) are retried; every other failure is
/// returned immediately.
pub(crate) async fn with_retry<F, Fut, T>(max_retries: usize, delay: Duration, mut op: F) -> FolioResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FolioResult<T>>,
{
    let strategy = FixedInterval::from_millis(delay.as_millis() as u64).take(max_retries);

    Retry::spawn(strategy, || {
        let attempt = op();
        async move {
            attempt.await.map_err(|e: FolioError| {
                if e.is_retryable() {
                    warn!(error = %e, delay_ms = delay.as_millis() as u64, "Rate limited, will retry");
                    RetryError::Transient {
                        err: e,
                        retry_after: None,
                    }
                } else {
                    RetryError::Permanent(e)
                }
            })
        }
    })
    .await
}
