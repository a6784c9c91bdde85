//! IssueTicketHandler - Command handler for the purchase flow.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{EventId, TicketId, Timestamp, UserId};
use crate::domain::ticketing::{may_issue, Credential, Event, Ticket, TicketingError};
use crate::ports::{
    EventRepository, NotificationSender, TicketConfirmation, TicketStore, UserDirectory,
};

/// Command to issue a ticket for an event.
#[derive(Debug, Clone)]
pub struct IssueTicketCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Result of successful issuance.
#[derive(Debug, Clone)]
pub struct IssueTicketResult {
    pub ticket: Ticket,
}

/// Handler for ticket issuance.
pub struct IssueTicketHandler {
    events: Arc<dyn EventRepository>,
    tickets: Arc<dyn TicketStore>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationSender>,
}

impl IssueTicketHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        tickets: Arc<dyn TicketStore>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            events,
            tickets,
            users,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: IssueTicketCommand,
    ) -> Result<IssueTicketResult, TicketingError> {
        // 1. Resolve the event; capacity enforcement needs its limit.
        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(cmd.event_id))?;

        // 2. Advisory capacity check: rejects obviously sold-out events
        //    before minting. The store re-checks under a lock, so a
        //    concurrent purchase slipping past this still cannot oversell.
        let issued = self.tickets.count_for_event(&cmd.event_id).await?;
        if !may_issue(&event, issued) {
            return Err(TicketingError::capacity_exceeded(
                cmd.event_id,
                event.capacity.unwrap_or(0),
            ));
        }

        // 3. Mint a credential and persist; the store enforces capacity
        //    atomically. A credential collision (same user, same event, same
        //    millisecond) gets one retry with a bumped timestamp.
        let now = Timestamp::now();
        let ticket = self
            .create_with_retry(&cmd, now, event.capacity)
            .await?;

        // 4. Confirmation is fire-and-forget: issuance has already
        //    succeeded, a delivery failure only gets logged.
        self.spawn_confirmation(ticket.clone(), event.clone());

        Ok(IssueTicketResult { ticket })
    }

    async fn create_with_retry(
        &self,
        cmd: &IssueTicketCommand,
        now: Timestamp,
        capacity: Option<u32>,
    ) -> Result<Ticket, TicketingError> {
        let ticket = self.mint(cmd, now)?;
        match self.tickets.create(&ticket, capacity).await {
            Ok(()) => Ok(ticket),
            Err(TicketingError::DuplicateCredential) => {
                // Bump the timestamp so the retried credential differs even
                // if the clock has not advanced.
                let retry_at = Timestamp::from_unix_millis(now.as_unix_millis() + 1)
                    .unwrap_or_else(Timestamp::now);
                let retried = self.mint(cmd, retry_at)?;
                match self.tickets.create(&retried, capacity).await {
                    Ok(()) => Ok(retried),
                    Err(TicketingError::DuplicateCredential) => Err(
                        TicketingError::issuance_failed("credential collision persisted after retry"),
                    ),
                    Err(other) => Err(other),
                }
            }
            Err(other) => Err(other),
        }
    }

    fn mint(&self, cmd: &IssueTicketCommand, at: Timestamp) -> Result<Ticket, TicketingError> {
        let credential = Credential::encode(&cmd.event_id, &cmd.user_id, at.as_unix_millis())?;
        Ok(Ticket::issue(
            TicketId::new(),
            cmd.event_id,
            cmd.user_id.clone(),
            credential,
            at,
        ))
    }

    fn spawn_confirmation(&self, ticket: Ticket, event: Event) {
        let users = Arc::clone(&self.users);
        let notifications = Arc::clone(&self.notifications);
        tokio::spawn(async move {
            let profile = match users.find_by_id(&ticket.user_id).await {
                Ok(Some(profile)) => profile,
                Ok(None) => {
                    warn!(user_id = %ticket.user_id, "skipping confirmation: user not found");
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "skipping confirmation: user lookup failed");
                    return;
                }
            };

            let confirmation = TicketConfirmation {
                recipient_email: profile.email,
                recipient_name: profile.name,
                ticket,
                event,
            };
            if let Err(err) = notifications.send_confirmation(&confirmation).await {
                warn!(error = %err, "ticket confirmation delivery failed");
            }
        });
    }
}
