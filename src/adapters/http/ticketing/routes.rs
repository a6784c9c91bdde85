//! Axum router configuration for ticketing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_ticket, confirm_ticket, get_ticket, payment_webhook, purchase_ticket, TicketsAppState,
};

/// Create the ticket API router.
///
/// # Routes
///
/// ## User endpoints (require authentication)
/// - `POST /` - Purchase a ticket
/// - `GET /:id` - Fetch one of the caller's tickets
///
/// ## Gate endpoints (require admin)
/// - `GET /validate` - Look up a credential without redeeming
/// - `POST /validate` - Redeem a credential
pub fn tickets_routes() -> Router<TicketsAppState> {
    Router::new()
        .route("/", post(purchase_ticket))
        .route("/validate", get(check_ticket).post(confirm_ticket))
        .route("/:id", get(get_ticket))
}

/// Create the payment webhook router.
///
/// Separate from the ticket routes because the webhook carries no user
/// session; the payment provider's signature is verified upstream.
pub fn webhook_routes() -> Router<TicketsAppState> {
    Router::new().route("/payment", post(payment_webhook))
}

/// Create the complete ticketing router, suitable for mounting at `/api`.
pub fn tickets_router() -> Router<TicketsAppState> {
    Router::new()
        .nest("/tickets", tickets_routes())
        .nest("/webhooks", webhook_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::rate_limiter::InMemoryRateLimiter;
    use crate::domain::foundation::{EventId, TicketId, Timestamp, UserId};
    use crate::domain::ticketing::{Event, Ticket, TicketingError};
    use crate::ports::{
        EventRepository, MarkUsedOutcome, NotificationError, NotificationSender,
        TicketConfirmation, TicketStore, UserDirectory, UserProfile,
    };
    use async_trait::async_trait;

    struct MockEventRepository;

    #[async_trait]
    impl EventRepository for MockEventRepository {
        async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, TicketingError> {
            Ok(Some(Event::new(
                *id,
                "Concert",
                "Alger",
                Timestamp::now(),
                2000,
                None,
            )))
        }
    }

    struct MockTicketStore;

    #[async_trait]
    impl TicketStore for MockTicketStore {
        async fn create(
            &self,
            _ticket: &Ticket,
            _capacity: Option<u32>,
        ) -> Result<(), TicketingError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &TicketId) -> Result<Option<Ticket>, TicketingError> {
            Ok(None)
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

    struct MockUserDirectory;

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, TicketingError> {
            Ok(Some(UserProfile {
                id: id.clone(),
                email: "user@example.com".to_string(),
                name: None,
            }))
        }
    }

    struct MockNotificationSender;

    #[async_trait]
    impl NotificationSender for MockNotificationSender {
        async fn send_confirmation(
            &self,
            _confirmation: &TicketConfirmation,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn test_state() -> TicketsAppState {
        TicketsAppState {
            events: Arc::new(MockEventRepository),
            tickets: Arc::new(MockTicketStore),
            users: Arc::new(MockUserDirectory),
            notifications: Arc::new(MockNotificationSender),
            rate_limiter: Arc::new(InMemoryRateLimiter::new(100, 60)),
        }
    }

    #[test]
    fn tickets_routes_creates_router() {
        let router = tickets_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn webhook_routes_creates_router() {
        let router = webhook_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn tickets_router_creates_combined_router() {
        let router = tickets_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
