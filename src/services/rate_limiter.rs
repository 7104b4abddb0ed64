use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::{Duration, Instant};

/// Non-blocking sliding-window throttle for outbound quote requests.
///
/// Alpha Vantage's free tier allows 5 requests per minute and answers
/// anything beyond that with a `Note` body. Instead of queueing callers we
/// refuse immediately when the window is full, so the request can fall
/// back to synthetic data at once.
pub struct RateLimiter {
    in_flight: Arc<Semaphore>,
    window: Mutex<VecDeque<Instant>>,
    max_per_window: usize,
    period: Duration,
}

impl RateLimiter {
    pub fn new(max_in_flight: usize, max_per_window: usize, period: Duration) -> Self {
        let max_per_window = max_per_window.max(1);
        Self {
            in_flight: Arc::new(Semaphore::new(max_in_flight.max(1))),
            window: Mutex::new(VecDeque::with_capacity(max_per_window)),
            max_per_window,
            period,
        }
    }

    pub fn per_minute(max_in_flight: usize, requests_per_minute: u32) -> Self {
        Self::new(
            max_in_flight,
            requests_per_minute as usize,
            Duration::from_secs(60),
        )
    }

    /// Claim a slot without waiting.
    ///
    /// `None` means either too many requests are in flight or the window
    /// is already full. A refused attempt does not consume a slot.
    pub fn try_acquire(&self) -> Option<RateLimitGuard> {
        let permit = self.in_flight.clone().try_acquire_owned().ok()?;

        let now = Instant::now();
        let mut window = self.window.lock();
        while window
            .front()
            .is_some_and(|&sent| now.duration_since(sent) >= self.period)
        {
            window.pop_front();
        }

        if window.len() >= self.max_per_window {
            return None;
        }
        window.push_back(now);

        Some(RateLimitGuard { _permit: permit })
    }

    /// Time until the oldest request in a full window expires.
    pub fn retry_after(&self) -> Option<Duration> {
        let window = self.window.lock();
        if window.len() < self.max_per_window {
            return None;
        }
        window
            .front()
            .map(|&sent| self.period.saturating_sub(sent.elapsed()))
    }

    #[cfg(test)]
    pub fn available_permits(&self) -> usize {
        self.in_flight.available_permits()
    }
}

/// Holds an in-flight permit until dropped.
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}
