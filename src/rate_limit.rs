//! Minimum-delay rate limiting between outgoing requests

use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock>;

/// Lets at most one request through per `delay`, blocking the caller
/// otherwise.
///
/// One limiter is shared by every dispatch call regardless of retailer.
/// A zero delay disables limiting.
pub struct RateLimiter {
    delay: Duration,
    clock: DefaultClock,
    limiter: Option<DirectLimiter>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        let clock = DefaultClock::default();
        let limiter = Quota::with_period(delay)
            .map(|quota| Governor::direct_with_clock(quota.allow_burst(NonZeroU32::MIN), &clock));
        Self {
            delay,
            clock,
            limiter,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Block until the limiter admits one more request
    pub fn wait(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        while let Err(not_until) = limiter.check() {
            let pause = not_until.wait_time_from(self.clock.now());
            debug!("Rate limiting: sleeping {pause:?}");
            std::thread::sleep(pause);
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_first_call_does_not_block() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.wait();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_enforces_minimum_gap() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.wait();
        limiter.wait();
        limiter.wait();
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[test]
    fn test_zero_delay_never_blocks() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            limiter.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(RateLimiter::default().delay(), Duration::from_secs(1));
    }
}
