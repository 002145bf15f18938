use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::AppError;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request was recorded; `remaining` more fit in the current window.
    Allowed { remaining: usize },
    /// The request was not recorded. The oldest request leaves the window after `retry_after`.
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }

    /// `Limited` as an [`AppError::RateLimited`], for handlers that propagate with `?`.
    pub fn into_result(self) -> Result<usize, AppError> {
        match self {
            RateDecision::Allowed { remaining } => Ok(remaining),
            RateDecision::Limited { retry_after } => Err(AppError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            }),
        }
    }
}

/// Sliding-window limiter for chat requests.
///
/// Tracks request timestamps per client id (session id or IP address). Owned by the chat
/// handler; there is no global instance.
#[derive(Debug)]
pub struct RateLimiter {
    /// Stores timestamps of requests for each client ID.
    requests: HashMap<String, Vec<Instant>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter`.
    ///
    /// # Arguments
    ///
    /// * `limit` - The number of requests allowed per `window`.
    /// * `window` - The time duration of the sliding window.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    pub fn check(&mut self, id: &str) -> RateDecision {
        self.check_at(id, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&mut self, id: &str, now: Instant) -> RateDecision {
        let window = self.window;
        let client_requests = self.requests.entry(id.to_string()).or_default();

        // Remove timestamps older than the window
        client_requests.retain(|&timestamp| now.saturating_duration_since(timestamp) < window);

        if client_requests.len() < self.limit {
            client_requests.push(now);
            return RateDecision::Allowed {
                remaining: self.limit - client_requests.len(),
            };
        }

        let retry_after = client_requests
            .first()
            .map(|&oldest| window.saturating_sub(now.saturating_duration_since(oldest)))
            .unwrap_or(window);
        warn!(client = id, retry_after_ms = retry_after.as_millis() as u64, "Chat request rate limited");
        RateDecision::Limited { retry_after }
    }

    /// Drop clients with no request inside the window. Returns how many were dropped.
    pub fn purge_idle(&mut self, now: Instant) -> usize {
        let window = self.window;
        let before = self.requests.len();
        self.requests.retain(|_, stamps| {
            stamps
                .last()
                .is_some_and(|&last| now.saturating_duration_since(last) < window)
        });
        before - self.requests.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        let now = Instant::now();
        for expected_remaining in (0..5).rev() {
            assert_eq!(
                limiter.check_at("client1", now),
                RateDecision::Allowed { remaining: expected_remaining }
            );
        }
        assert!(!limiter.check_at("client1", now).is_allowed());
        assert!(limiter.check_at("client2", now).is_allowed());
    }

    #[test]
    fn test_rate_limiter_resets_after_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        let start = Instant::now();
        assert!(limiter.check_at("client2", start).is_allowed());
        assert!(limiter.check_at("client2", start + Duration::from_millis(10)).is_allowed());

        match limiter.check_at("client2", start + Duration::from_millis(20)) {
            RateDecision::Limited { retry_after } => {
                assert_eq!(retry_after, Duration::from_millis(30))
            }
            other => panic!("expected Limited, got {:?}", other),
        }

        assert!(limiter.check_at("client2", start + Duration::from_millis(60)).is_allowed());
    }

    #[test]
    fn test_limited_maps_to_app_error() {
        let decision = RateDecision::Limited {
            retry_after: Duration::from_millis(200),
        };
        assert!(matches!(
            decision.into_result(),
            Err(AppError::RateLimited { retry_after_secs: 1 })
        ));
        assert_eq!(RateDecision::Allowed { remaining: 3 }.into_result().unwrap(), 3);
    }

    #[test]
    fn test_purge_idle_clients() {
        let mut limiter = RateLimiter::new(3, Duration::from_secs(1));
        let start = Instant::now();
        limiter.check_at("old", start);
        limiter.check_at("fresh", start + Duration::from_millis(900));

        assert_eq!(limiter.purge_idle(start + Duration::from_millis(1500)), 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
