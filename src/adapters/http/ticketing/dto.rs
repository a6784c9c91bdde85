//! Data transfer objects for the ticketing HTTP API.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, TicketId, UserId};
use crate::domain::ticketing::{Event, Ticket, WindowCheck};

/// Standard error envelope for all ticketing endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            used_at: None,
        }
    }

    pub fn with_used_at(mut self, used_at: impl Into<String>) -> Self {
        self.used_at = Some(used_at.into());
        self
    }
}

/// Request body for `POST /api/tickets`.
#[derive(Debug, Deserialize)]
pub struct PurchaseTicketRequest {
    pub event_id: EventId,
}

/// Request body for the trusted payment webhook.
#[derive(Debug, Deserialize)]
pub struct PaymentWebhookRequest {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Query string for `GET /api/tickets/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub code: String,
}

/// Request body for `POST /api/tickets/validate`.
#[derive(Debug, Deserialize)]
pub struct ConfirmTicketRequest {
    pub code: String,
}

/// A ticket as returned to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponse {
    pub ticket_id: TicketId,
    pub event_id: EventId,
    pub credential: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<String>,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.id,
            event_id: ticket.event_id,
            credential: ticket.credential.to_string(),
            created_at: ticket.created_at.to_string(),
            used_at: ticket.used_at.map(|t| t.to_string()),
        }
    }
}

/// Event details accompanying ticket responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub location: String,
    pub date: String,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            location: event.location.clone(),
            date: event.date.to_string(),
        }
    }
}

/// Response for the read-only gate lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckTicketResponse {
    /// "valid", "used", "not_yet_open", or "ended".
    pub status: String,
    pub ticket: TicketResponse,
    pub event: EventSummary,
}

impl CheckTicketResponse {
    pub fn from_parts(ticket: &Ticket, event: &Event, window: WindowCheck) -> Self {
        let status = if ticket.is_used() {
            "used"
        } else {
            match window {
                WindowCheck::Open => "valid",
                WindowCheck::NotYetOpen => "not_yet_open",
                WindowCheck::Ended => "ended",
            }
        };
        Self {
            status: status.to_string(),
            ticket: ticket.into(),
            event: event.into(),
        }
    }
}

/// Response for a successful redemption.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmTicketResponse {
    pub ticket: TicketResponse,
    pub event: EventSummary,
    pub display_name: String,
    pub validation_code: String,
}

/// Response for the owner-scoped ticket fetch.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetTicketResponse {
    pub ticket: TicketResponse,
    pub event: EventSummary,
}
