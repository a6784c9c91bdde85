//! Session validation port.
//!
//! Validates bearer tokens and produces the authenticated user the HTTP
//! layer attaches to requests. Implementations decide the token format.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for session token validation.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a bearer token and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` for bad or stale tokens
    /// - `ServiceUnavailable` if validation infrastructure is down
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
