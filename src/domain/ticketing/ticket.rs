//! Ticket entity and its lifecycle.
//!
//! A ticket is created exactly once at issuance; its identifiers and
//! credential are immutable thereafter. The only state transition is
//! unused -> used, and it never reverts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, TicketId, Timestamp, UserId};

use super::{Credential, TicketingError};

/// A purchased ticket for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub credential: Credential,
    pub created_at: Timestamp,
    /// Set exactly once when the ticket is redeemed at the gate.
    pub used_at: Option<Timestamp>,
}

impl Ticket {
    /// Creates a freshly issued, unused ticket.
    pub fn issue(
        id: TicketId,
        event_id: EventId,
        user_id: UserId,
        credential: Credential,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id,
            credential,
            created_at,
            used_at: None,
        }
    }

    /// Whether the ticket has been redeemed.
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    /// Transitions the ticket to used.
    ///
    /// Fails with `AlreadyUsed` carrying the original redemption time if the
    /// transition already happened. Against the durable store this check is
    /// performed as a conditional update; this method is the in-memory
    /// equivalent used by the entity and by test doubles.
    pub fn mark_used(&mut self, at: Timestamp) -> Result<(), TicketingError> {
        match self.used_at {
            Some(used_at) => Err(TicketingError::already_used(self.id, used_at)),
            None => {
                self.used_at = Some(at);
                Ok(())
            }
        }
    }
}
