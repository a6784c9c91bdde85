//! GetTicketHandler - Owner-scoped ticket lookup.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, TicketId};
use crate::domain::ticketing::{Event, Ticket, TicketingError};
use crate::ports::{EventRepository, TicketStore};

/// Query to fetch one ticket for rendering client-side.
#[derive(Debug, Clone)]
pub struct GetTicketQuery {
    pub ticket_id: TicketId,
    pub caller: AuthenticatedUser,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct GetTicketResult {
    pub ticket: Ticket,
    pub event: Event,
}

/// Handler for fetching a single ticket.
///
/// Only the ticket's owner (or a gate admin) may see it; anyone else gets
/// `TicketNotFound` rather than confirmation that the ticket exists.
pub struct GetTicketHandler {
    tickets: Arc<dyn TicketStore>,
    events: Arc<dyn EventRepository>,
}

impl GetTicketHandler {
    pub fn new(tickets: Arc<dyn TicketStore>, events: Arc<dyn EventRepository>) -> Self {
        Self { tickets, events }
    }

    pub async fn handle(&self, query: GetTicketQuery) -> Result<GetTicketResult, TicketingError> {
        let ticket = self
            .tickets
            .find_by_id(&query.ticket_id)
            .await?
            .ok_or(TicketingError::TicketNotFound)?;

        if ticket.user_id != query.caller.id && !query.caller.is_admin {
            return Err(TicketingError::TicketNotFound);
        }

        let event = self
            .events
            .find_by_id(&ticket.event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(ticket.event_id))?;

        Ok(GetTicketResult { ticket, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, EventId, Timestamp, UserId};
    use crate::domain::ticketing::Credential;
    use crate::ports::MarkUsedOutcome;
    use async_trait::async_trait;

    struct MockTicketStore {
        ticket: Option<Ticket>,
    }

    #[async_trait]
    impl TicketStore for MockTicketStore {
        async fn create(
            &self,
            _ticket: &Ticket,
            _capacity: Option<u32>,
        ) -> Result<(), TicketingError> {
            Ok(())
        }

        async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketingError> {
            Ok(self.ticket.clone().filter(|t| t.id == *id))
        }

        async fn find_by_credential(
            &self,
            _credential: &str,
        ) -> Result<Option<Ticket>, TicketingError> {
            Ok(None)
        }

        async fn count_for_event(&self, _event_id: &EventId) -> Result<u64, TicketingError> {
            Ok(0)
        }

        async fn mark_used(
            &self,
            _credential: &str,
            _at: Timestamp,
        ) -> Result<MarkUsedOutcome, TicketingError> {
            Err(TicketingError::TicketNotFound)
        }
    }

    struct MockEventRepository {
        event: Option<Event>,
    }

    #[async_trait]
    impl EventRepository for MockEventRepository {
        async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, TicketingError> {
            Ok(self.event.clone().filter(|e| e.id == *id))
        }
    }

    fn fixture() -> (Ticket, Event) {
        let event = Event::new(
            EventId::new(),
            "Concert",
            "Alger",
            Timestamp::now(),
            2000,
            None,
        );
        let user_id = UserId::new("owner-1").unwrap();
        let now = Timestamp::now();
        let credential = Credential::encode(&event.id, &user_id, now.as_unix_millis()).unwrap();
        let ticket = Ticket::issue(TicketId::new(), event.id, user_id, credential, now);
        (ticket, event)
    }

    fn caller(user_id: &str, is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new(user_id).unwrap(),
            format!("{}@example.com", user_id),
            None,
            is_admin,
        )
    }

    fn handler(ticket: Option<Ticket>, event: Option<Event>) -> GetTicketHandler {
        GetTicketHandler::new(
            Arc::new(MockTicketStore { ticket }),
            Arc::new(MockEventRepository { event }),
        )
    }

    #[tokio::test]
    async fn owner_can_fetch_their_ticket() {
        let (ticket, event) = fixture();
        let handler = handler(Some(ticket.clone()), Some(event));

        let result = handler
            .handle(GetTicketQuery {
                ticket_id: ticket.id,
                caller: caller("owner-1", false),
            })
            .await
            .unwrap();

        assert_eq!(result.ticket, ticket);
    }

    #[tokio::test]
    async fn admin_can_fetch_any_ticket() {
        let (ticket, event) = fixture();
        let handler = handler(Some(ticket.clone()), Some(event));

        let result = handler
            .handle(GetTicketQuery {
                ticket_id: ticket.id,
                caller: caller("someone-else", true),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stranger_sees_not_found() {
        let (ticket, event) = fixture();
        let handler = handler(Some(ticket.clone()), Some(event));

        let err = handler
            .handle(GetTicketQuery {
                ticket_id: ticket.id,
                caller: caller("someone-else", false),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::TicketNotFound);
    }

    #[tokio::test]
    async fn missing_ticket_is_not_found() {
        let handler = handler(None, None);

        let err = handler
            .handle(GetTicketQuery {
                ticket_id: TicketId::new(),
                caller: caller("owner-1", false),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::TicketNotFound);
    }
}
