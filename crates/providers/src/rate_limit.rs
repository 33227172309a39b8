//! Minimum spacing between outbound generation calls.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until `min_interval` has passed since the previous permit, then
    /// take a new one. Returns how long the caller was held back.
    ///
    /// The lock is held across the sleep so concurrent callers queue up.
    pub async fn acquire(&self) -> Duration {
        let mut last_call = self.last_call.lock().await;

        let waited = match *last_call {
            Some(prev) => {
                let elapsed = prev.elapsed();
                if elapsed < self.min_interval {
                    let remaining = self.min_interval - elapsed;
                    tracing::debug!("Rate limited, waiting {}ms", remaining.as_millis());
                    sleep(remaining).await;
                    remaining
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };

        *last_call = Some(Instant::now());
        waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(1000));

        let first = Instant::now();
        assert_eq!(limiter.acquire().await, Duration::ZERO);
        limiter.acquire().await;
        assert!(first.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(1000));
        limiter.acquire().await;

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(limiter.acquire().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(1000));
        limiter.acquire().await;

        sleep(Duration::from_millis(400)).await;
        let waited = limiter.acquire().await;
        assert_eq!(waited, Duration::from_millis(600));
    }
}
