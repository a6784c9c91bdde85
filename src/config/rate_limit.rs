//! Rate limiting configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Rate limiting for the public endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window, per caller
    #[serde(default = "default_limit")]
    pub requests_per_window: u32,

    /// Window duration in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
}

impl RateLimitConfig {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_limit(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_limit() -> u32 {
    10
}

fn default_window_secs() -> u32 {
    60
}
