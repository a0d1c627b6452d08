//! One throttle queue per distinct ceiling.

use crate::ThrottleQueue;
use crate::tiers::MAX_RATE_LIMIT;
use folio_error::ThrottleError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Admission window used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Routes operations into per-ceiling queues.
///
/// Queues are created lazily the first time a ceiling is seen and live until
/// [`ThrottleQueueManager::abort_all`]. Requests with equal ceilings share a
/// queue; different ceilings never do.
///
/// # Example
///
/// ```
/// use folio_error::ThrottleError;
/// use folio_rate_limit::ThrottleQueueManager;
///
/// # tokio_test();
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn tokio_test() {
/// let manager = ThrottleQueueManager::default();
/// let answer = manager
///     .execute(50, || async { Ok::<_, ThrottleError>(42) })
///     .await
///     .unwrap();
/// assert_eq!(answer, 42);
/// assert_eq!(manager.queue_count(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct ThrottleQueueManager {
    queues: Mutex<HashMap<u32, Arc<ThrottleQueue>>>,
    interval: Duration,
}

impl ThrottleQueueManager {
    /// Create a manager whose queues use the given admission window.
    pub fn new(interval: Duration) -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            interval,
        }
    }

    /// Admission window shared by every queue.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Queue for `ceiling`, created on first use.
    ///
    /// Ceilings are clamped to `1..=MAX_RATE_LIMIT`.
    pub fn queue(&self, ceiling: u32) -> Arc<ThrottleQueue> {
        let ceiling = ceiling.clamp(1, MAX_RATE_LIMIT);
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues
            .entry(ceiling)
            .or_insert_with(|| Arc::new(ThrottleQueue::new(ceiling, self.interval)))
            .clone()
    }

    /// Run `op` once the queue for `ceiling` admits it.
    ///
    /// The queue is resolved when this is called, before the returned future
    /// is first polled. Operations still waiting when [`abort_all`] runs fail
    /// with [`ThrottleError`]; operations already admitted run to completion.
    ///
    /// [`abort_all`]: ThrottleQueueManager::abort_all
    pub fn execute<F, Fut, T, E>(
        &self,
        ceiling: u32,
        op: F,
    ) -> impl Future<Output = Result<T, E>> + use<F, Fut, T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<ThrottleError>,
    {
        let queue = self.queue(ceiling);
        async move {
            queue.admit().await?;
            op().await
        }
    }

    /// Cancel all pending work and drop every queue.
    ///
    /// The next request after this creates a fresh queue.
    #[instrument(skip(self))]
    pub fn abort_all(&self) {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        for queue in queues.values() {
            queue.abort();
        }
        info!(aborted = queues.len(), "Aborted all throttle queues");
        queues.clear();
    }

    /// Number of live queues.
    pub fn queue_count(&self) -> usize {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether a queue exists for `ceiling`.
    pub fn has_queue(&self, ceiling: u32) -> bool {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&ceiling.clamp(1, MAX_RATE_LIMIT))
    }

    /// Ceilings of the live queues, ascending.
    pub fn ceilings(&self) -> Vec<u32> {
        let mut ceilings: Vec<u32> = self
            .queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ceilings.sort_unstable();
        debug!(?ceilings, "Listing throttle queues");
        ceilings
    }
}

impl Default for ThrottleQueueManager {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
