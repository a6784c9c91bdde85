//! CheckTicketHandler - Read-only credential lookup for the gate screen.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::ticketing::{evaluate_window, Event, Ticket, TicketingError, WindowCheck};
use crate::ports::{EventRepository, TicketStore};

/// Query to look up a ticket by its credential without redeeming it.
#[derive(Debug, Clone)]
pub struct CheckTicketQuery {
    pub credential: String,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct CheckTicketResult {
    pub ticket: Ticket,
    pub event: Event,
    /// Where the lookup time falls relative to the event's validity window.
    pub window: WindowCheck,
}

/// Handler for the read-only gate lookup.
///
/// The credential is treated as an opaque store key: anything non-empty
/// is looked up as-is, and an unknown string is `TicketNotFound`, not
/// malformed. Never mutates any ticket.
pub struct CheckTicketHandler {
    tickets: Arc<dyn TicketStore>,
    events: Arc<dyn EventRepository>,
}

impl CheckTicketHandler {
    pub fn new(tickets: Arc<dyn TicketStore>, events: Arc<dyn EventRepository>) -> Self {
        Self { tickets, events }
    }

    pub async fn handle(&self, query: CheckTicketQuery) -> Result<CheckTicketResult, TicketingError> {
        let credential = query.credential.trim();
        if credential.is_empty() {
            return Err(TicketingError::malformed_credential("missing credential"));
        }

        let ticket = self
            .tickets
            .find_by_credential(credential)
            .await?
            .ok_or(TicketingError::TicketNotFound)?;

        let event = self
            .events
            .find_by_id(&ticket.event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(ticket.event_id))?;

        let window = evaluate_window(event.date, Timestamp::now());

        Ok(CheckTicketResult {
            ticket,
            event,
            window,
        })
    }
}
