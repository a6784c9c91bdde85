//! In-memory rate limiter.
//!
//! Fixed-window counter over a HashMap. Sufficient for single-server
//! deployments; a multi-server deployment would need a shared backend.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitError, RateLimitKey, RateLimitResult, RateLimiter};

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

/// In-memory implementation of the RateLimiter port.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    /// Maximum requests per window.
    limit: u32,
    /// Window duration in seconds.
    window_secs: u32,
    windows: RwLock<HashMap<String, WindowState>>,
}

impl InMemoryRateLimiter {
    pub fn new(limit: u32, window_secs: u32) -> Self {
        Self {
            limit,
            window_secs,
            windows: RwLock::new(HashMap::new()),
        }
    }

    fn now_secs() -> u64 {
        let millis = Timestamp::now().as_unix_millis();
        (millis / 1000).max(0) as u64
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let now = Self::now_secs();
        let mut windows = self.windows.write().await;

        let state = windows.entry(key.to_string()).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
        });

        let window_end = state.window_start + u64::from(self.window_secs);
        if now >= window_end {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.limit {
            let retry_after_secs = (state.window_start + u64::from(self.window_secs))
                .saturating_sub(now) as u32;
            return Ok(RateLimitResult::Denied {
                retry_after_secs: retry_after_secs.max(1),
            });
        }

        state.count += 1;
        Ok(RateLimitResult::Allowed {
            remaining: self.limit - state.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn allows_up_to_the_limit_then_denies() {
        let limiter = InMemoryRateLimiter::new(3, 60);
        let user_id = UserId::new("user-1").unwrap();

        for _ in 0..3 {
            let result = limiter
                .check(RateLimitKey::user(&user_id, "purchase"))
                .await
                .unwrap();
            assert!(result.is_allowed());
        }

        let denied = limiter
            .check(RateLimitKey::user(&user_id, "purchase"))
            .await
            .unwrap();
        assert!(!denied.is_allowed());
    }

    #[tokio::test]
    async fn distinct_keys_have_independent_windows() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        let a = UserId::new("user-a").unwrap();
        let b = UserId::new("user-b").unwrap();

        assert!(limiter
            .check(RateLimitKey::user(&a, "purchase"))
            .await
            .unwrap()
            .is_allowed());
        assert!(limiter
            .check(RateLimitKey::user(&b, "purchase"))
            .await
            .unwrap()
            .is_allowed());
        assert!(!limiter
            .check(RateLimitKey::user(&a, "purchase"))
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn operations_are_limited_separately() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        let user_id = UserId::new("user-1").unwrap();

        assert!(limiter
            .check(RateLimitKey::user(&user_id, "purchase"))
            .await
            .unwrap()
            .is_allowed());
        assert!(limiter
            .check(RateLimitKey::user(&user_id, "validate"))
            .await
            .unwrap()
            .is_allowed());
    }
}
