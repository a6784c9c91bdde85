//! Notification sender port.
//!
//! Delivers the ticket confirmation after issuance. Delivery is
//! fire-and-forget from the purchaser's perspective: issuance never fails
//! because a confirmation could not be sent.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ticketing::{Event, Ticket};

/// Everything the confirmation message needs to render.
#[derive(Debug, Clone)]
pub struct TicketConfirmation {
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub ticket: Ticket,
    pub event: Event,
}

/// Errors that can occur while sending a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The provider rejected the message.
    #[error("notification rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("notification service unavailable: {0}")]
    Unavailable(String),
}

/// Port for outbound ticket confirmations.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends a ticket confirmation.
    async fn send_confirmation(
        &self,
        confirmation: &TicketConfirmation,
    ) -> Result<(), NotificationError>;
}
