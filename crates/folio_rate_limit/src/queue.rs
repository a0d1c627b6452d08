//! A single tier's admission queue.

use folio_error::ThrottleError;
use governor::clock::Clock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::{debug, trace};

/// Governor clock reading the Tokio timer, so admission follows a paused
/// or advanced runtime clock.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TokioClock;

impl Clock for TokioClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now().into_std()
    }
}

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, TokioClock, NoOpMiddleware<std::time::Instant>>;

/// Admits at most `ceiling` operations per `interval`.
///
/// Admissions are spaced `interval / ceiling` apart with a burst of one, so
/// any window of `interval * k` admits at most `ceiling * k` operations.
/// Waiters are served strictly in arrival order: the fair admission lock is
/// held while the head waiter sleeps for its cell.
pub struct ThrottleQueue {
    ceiling: u32,
    interval: Duration,
    limiter: DirectLimiter,
    turn: Mutex<()>,
    aborted: watch::Sender<bool>,
}

impl std::fmt::Debug for ThrottleQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottleQueue")
            .field("ceiling", &self.ceiling)
            .field("interval", &self.interval)
            .field("aborted", &*self.aborted.borrow())
            .finish_non_exhaustive()
    }
}

impl ThrottleQueue {
    /// Create a queue. A ceiling of zero is treated as one.
    pub fn new(ceiling: u32, interval: Duration) -> Self {
        let ceiling = ceiling.max(1);
        let period = (interval / ceiling).max(Duration::from_nanos(1));
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::MIN);
        debug!(
            ceiling,
            interval_ms = interval.as_millis() as u64,
            period_us = period.as_micros() as u64,
            "Creating throttle queue"
        );
        Self {
            ceiling,
            interval,
            limiter: RateLimiter::direct_with_clock(quota, TokioClock),
            turn: Mutex::new(()),
            aborted: watch::Sender::new(false),
        }
    }

    /// Requests per interval admitted by this queue.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Length of the admission window.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reject every waiter that has not been admitted yet, and all future ones.
    pub fn abort(&self) {
        self.aborted.send_replace(true);
    }

    /// Wait for an admission slot.
    ///
    /// Fails with [`ThrottleError`] if the queue is aborted before the slot
    /// is granted.
    pub async fn admit(&self) -> Result<(), ThrottleError> {
        let mut aborted = self.aborted.subscribe();
        tokio::select! {
            biased;
            _ = aborted.wait_for(|a| *a) => Err(ThrottleError::aborted(self.ceiling)),
            _ = self.wait_turn() => Ok(()),
        }
    }

    async fn wait_turn(&self) {
        let _turn = self.turn.lock().await;
        while let Err(not_until) = self.limiter.check() {
            let wait = not_until.wait_time_from(TokioClock.now());
            trace!(ceiling = self.ceiling, wait_us = wait.as_micros() as u64, "Queue full, waiting");
            tokio::time::sleep(wait).await;
        }
    }
}
