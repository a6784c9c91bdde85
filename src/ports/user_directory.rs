//! User directory port (read side).
//!
//! Resolves a user id to the profile fields needed for the confirmation
//! message. The directory is authoritative for email addresses; the session
//! token's claims are only used for authentication.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::ticketing::TicketingError;

/// A user profile as seen by the ticketing core.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

/// Port for user profile lookups.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user profile by ID.
    ///
    /// Returns `None` if the user does not exist.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, TicketingError>;
}
