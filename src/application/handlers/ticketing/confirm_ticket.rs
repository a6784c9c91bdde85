//! ConfirmTicketHandler - Command handler for gate redemption.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::ticketing::{
    evaluate_window, generate_display_name, generate_validation_code, Event, Ticket,
    TicketingError, WindowCheck,
};
use crate::ports::{EventRepository, MarkUsedOutcome, TicketStore};

/// Command to redeem a ticket at the gate.
#[derive(Debug, Clone)]
pub struct ConfirmTicketCommand {
    pub credential: String,
}

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct ConfirmTicketResult {
    pub ticket: Ticket,
    pub event: Event,
    /// Whimsical name shown on the gate screen.
    pub display_name: String,
    /// Short code gate staff can read out.
    pub validation_code: String,
}

/// Handler for ticket redemption.
///
/// Order of checks: existence, prior use, validity window, then the atomic
/// mark-used. The final step is a conditional update so a concurrent scan
/// that slipped past the prior-use check still loses cleanly.
pub struct ConfirmTicketHandler {
    tickets: Arc<dyn TicketStore>,
    events: Arc<dyn EventRepository>,
}

impl ConfirmTicketHandler {
    pub fn new(tickets: Arc<dyn TicketStore>, events: Arc<dyn EventRepository>) -> Self {
        Self { tickets, events }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmTicketCommand,
    ) -> Result<ConfirmTicketResult, TicketingError> {
        let credential = cmd.credential.trim();
        if credential.is_empty() {
            return Err(TicketingError::malformed_credential("missing credential"));
        }

        let ticket = self
            .tickets
            .find_by_credential(credential)
            .await?
            .ok_or(TicketingError::TicketNotFound)?;

        if let Some(used_at) = ticket.used_at {
            return Err(TicketingError::already_used(ticket.id, used_at));
        }

        let event = self
            .events
            .find_by_id(&ticket.event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(ticket.event_id))?;

        let now = Timestamp::now();
        match evaluate_window(event.date, now) {
            WindowCheck::Open => {}
            WindowCheck::NotYetOpen => return Err(TicketingError::NotYetOpen),
            WindowCheck::Ended => return Err(TicketingError::EventEnded),
        }

        let ticket = match self.tickets.mark_used(credential, now).await? {
            MarkUsedOutcome::Marked(ticket) => ticket,
            MarkUsedOutcome::AlreadyUsed { used_at } => {
                return Err(TicketingError::already_used(ticket.id, used_at));
            }
        };

        Ok(ConfirmTicketResult {
            ticket,
            event,
            display_name: generate_display_name(),
            validation_code: generate_validation_code(),
        })
    }
}
