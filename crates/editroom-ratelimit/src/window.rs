use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

use crate::error::RateLimitError;

/// Counter state for one client within the current window
struct Window {
    started_at: Instant,
    count: u32,
}

/// In-memory fixed-window rate limiter keyed by client identity
///
/// Every key gets a fresh budget of `max_requests` when its window elapses.
/// State is process-local; nothing survives a restart.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Create a new limiter
    ///
    /// # Arguments
    /// * `max_requests` - Maximum requests per window
    /// * `window` - Window duration
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitError> {
        if max_requests == 0 {
            return Err(RateLimitError::Config("max_requests must be > 0".to_string()));
        }
        if window.is_zero() {
            return Err(RateLimitError::Config("rate limit window must be > 0".to_string()));
        }

        Ok(Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
        })
    }

    /// Count a request against the given key
    ///
    /// Returns `Err(Exceeded)` once the key has used up its budget for the
    /// current window.
    pub fn check(&self, key: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window {
                started_at: now,
                count: 0,
            });

        let elapsed = now.duration_since(entry.started_at);
        if elapsed >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(RateLimitError::Exceeded { retry_after });
        }

        entry.count += 1;
        Ok(())
    }

    /// Drop state for keys whose window has long elapsed
    ///
    /// Bounds memory under churny client populations, where every distinct
    /// client identity otherwise leaves an entry behind for the process
    /// lifetime.
    pub fn prune(&self) {
        prune_stale(&self.windows, self.window * 2);
    }

    /// Spawn a background task that prunes stale keys on an interval
    ///
    /// The task holds only a weak reference to the counter map and exits once
    /// the limiter (and every clone of it) has been dropped.
    pub fn spawn_pruner(&self) {
        let windows = Arc::downgrade(&self.windows);
        let horizon = self.window * 2;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(horizon);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match windows.upgrade() {
                    Some(windows) => prune_stale(&windows, horizon),
                    None => break,
                }
            }
            tracing::debug!("rate limiter dropped, pruner task exiting");
        });
    }
}

fn prune_stale(windows: &DashMap<String, Window>, horizon: Duration) {
    let now = Instant::now();
    windows.retain(|_, window| now.duration_since(window.started_at) < horizon);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit() {
        let limiter = FixedWindowLimiter::new(20, Duration::from_secs(60)).unwrap();
        for _ in 0..20 {
            limiter.check("1.2.3.4").unwrap();
        }
        let err = limiter.check("1.2.3.4").unwrap_err();
        assert!(matches!(err, RateLimitError::Exceeded { .. }));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60)).unwrap();
        limiter.check("a").unwrap();
        limiter.check("b").unwrap();
        assert!(limiter.check("a").is_err());
    }

    #[test]
    fn window_resets_after_elapse() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(40)).unwrap();
        limiter.check("a").unwrap();
        assert!(limiter.check("a").is_err());
        std::thread::sleep(Duration::from_millis(60));
        limiter.check("a").unwrap();
    }

    #[test]
    fn retry_after_is_at_least_one_second() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(500)).unwrap();
        limiter.check("a").unwrap();
        match limiter.check("a").unwrap_err() {
            RateLimitError::Exceeded { retry_after } => assert!(retry_after >= 1),
            RateLimitError::Config(_) => panic!("unexpected config error"),
        }
    }

    #[test]
    fn zero_budget_is_a_config_error() {
        assert!(FixedWindowLimiter::new(0, Duration::from_secs(60)).is_err());
    }

    #[test]
    fn prune_drops_stale_keys() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(10)).unwrap();
        limiter.check("stale").unwrap();
        std::thread::sleep(Duration::from_millis(30));
        limiter.prune();
        assert!(limiter.windows.is_empty());
    }

    #[tokio::test]
    async fn pruner_task_drops_stale_keys() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(10)).unwrap();
        limiter.check("one-shot").unwrap();
        limiter.spawn_pruner();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(limiter.windows.is_empty());
    }
}
