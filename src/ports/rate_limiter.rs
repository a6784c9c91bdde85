//! Rate limiting port for the public ticketing endpoints.
//!
//! Fixed-window counter keyed by caller. Purchase and validation endpoints
//! are throttled per user; unauthenticated surfaces can throttle per IP.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Checks whether a request is allowed, consuming a slot if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Identifier of the caller (user id or IP address).
    pub identifier: String,
    /// The operation being throttled (e.g. "purchase", "validate").
    pub operation: &'static str,
}

impl RateLimitKey {
    /// Creates a per-user key for an operation.
    pub fn user(user_id: &UserId, operation: &'static str) -> Self {
        Self {
            identifier: user_id.to_string(),
            operation,
        }
    }

    /// Creates a per-IP key for an operation.
    pub fn ip(ip: &str, operation: &'static str) -> Self {
        Self {
            identifier: ip.to_string(),
            operation,
        }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ratelimit:{}:{}", self.operation, self.identifier)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq)]
pub enum RateLimitResult {
    /// Request is allowed; `remaining` slots left in the current window.
    Allowed { remaining: u32 },
    /// Request is denied; retry after the given number of seconds.
    Denied { retry_after_secs: u32 },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}
