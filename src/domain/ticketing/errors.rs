//! Ticketing error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, TicketId, Timestamp};

/// Errors raised by the ticketing domain and its handlers.
#[derive(Debug, Clone, Error)]
pub enum TicketingError {
    /// The referenced event does not exist.
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// No ticket exists for the presented credential.
    #[error("Ticket not found")]
    TicketNotFound,

    /// The input does not look like a credential at all.
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// The event's capacity is exhausted.
    #[error("Event {event_id} is sold out (capacity {capacity})")]
    CapacityExceeded { event_id: EventId, capacity: u32 },

    /// Issuance minted a credential that already exists in the store.
    #[error("Credential collision during issuance")]
    DuplicateCredential,

    /// Issuance could not complete after retrying.
    #[error("Ticket issuance failed: {0}")]
    IssuanceFailed(String),

    /// The ticket was already redeemed.
    #[error("Ticket {ticket_id} already used at {used_at}")]
    AlreadyUsed {
        ticket_id: TicketId,
        used_at: Timestamp,
    },

    /// Presented more than one day after the event date.
    #[error("Event has ended")]
    EventEnded,

    /// Presented more than one day before the event date.
    #[error("Validity window not yet open")]
    NotYetOpen,

    /// Storage, network, or other infrastructure failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl TicketingError {
    pub fn malformed_credential(reason: impl Into<String>) -> Self {
        Self::MalformedCredential(reason.into())
    }

    pub fn capacity_exceeded(event_id: EventId, capacity: u32) -> Self {
        Self::CapacityExceeded { event_id, capacity }
    }

    pub fn issuance_failed(message: impl Into<String>) -> Self {
        Self::IssuanceFailed(message.into())
    }

    pub fn already_used(ticket_id: TicketId, used_at: Timestamp) -> Self {
        Self::AlreadyUsed { ticket_id, used_at }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EventNotFound(_) => ErrorCode::EventNotFound,
            Self::TicketNotFound => ErrorCode::TicketNotFound,
            Self::MalformedCredential(_) => ErrorCode::MalformedCredential,
            Self::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            Self::DuplicateCredential => ErrorCode::DuplicateCredential,
            Self::IssuanceFailed(_) => ErrorCode::IssuanceFailed,
            Self::AlreadyUsed { .. } => ErrorCode::TicketAlreadyUsed,
            Self::EventEnded => ErrorCode::EventEnded,
            Self::NotYetOpen => ErrorCode::EventNotOpen,
            Self::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<TicketingError> for DomainError {
    fn from(err: TicketingError) -> Self {
        let message = err.to_string();
        DomainError::new(err.code(), message)
    }
}

impl From<DomainError> for TicketingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EventNotFound | ErrorCode::TicketNotFound => Self::TicketNotFound,
            ErrorCode::MalformedCredential => Self::MalformedCredential(err.message),
            _ => Self::Infrastructure(err.message),
        }
    }
}
