//! Event repository port (read side).
//!
//! Events are managed by admin tooling; the ticketing core only reads them
//! to check capacity at purchase and the date window at the gate.

use async_trait::async_trait;

use crate::domain::foundation::EventId;
use crate::domain::ticketing::{Event, TicketingError};

/// Repository port for event lookups.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Finds an event by its ID.
    ///
    /// Returns `None` if the event does not exist.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, TicketingError>;
}
