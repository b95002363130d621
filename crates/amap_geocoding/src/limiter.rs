//! Outbound request throttling
//!
//! Single-token bucket: capacity one, one token per refill interval. A call
//! that finds the bucket empty sleeps until the next grant instant instead of
//! busy-waiting.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Token bucket shared by all calls on one client
#[derive(Debug)]
pub(crate) struct RateLimiter {
    interval: Duration,
    next_grant: Mutex<Instant>,
}

impl RateLimiter {
    /// Create a limiter granting one token per `interval`
    ///
    /// A zero interval disables throttling. The first token is available
    /// immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_grant: Mutex::new(Instant::now()),
        }
    }

    /// Block until the bucket grants a token
    ///
    /// Waiters queue on the internal lock, so grants are spaced at least one
    /// interval apart no matter how many tasks call concurrently.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let mut next = self.next_grant.lock().await;
        let now = Instant::now();
        let grant = if *next > now { *next } else { now };
        if grant > now {
            debug!(wait = ?(grant - now), "throttling outbound request");
            tokio::time::sleep_until(grant).await;
        }
        *next = grant + self.interval;
    }
}
