//! Integration tests for the ticketing HTTP endpoints.
//!
//! Drives the full axum stack (auth middleware, extractors, handlers)
//! against in-memory adapters: purchase, gate lookup, redemption, and the
//! payment webhook.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::{middleware, Router};
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use fantasia::adapters::auth::MockSessionValidator;
use fantasia::adapters::http::middleware::{auth_middleware, AuthState};
use fantasia::adapters::http::ticketing::{tickets_router, TicketsAppState};
use fantasia::adapters::rate_limiter::InMemoryRateLimiter;
use fantasia::domain::foundation::{EventId, TicketId, Timestamp, UserId};
use fantasia::domain::ticketing::{Event, Ticket, TicketingError};
use fantasia::ports::{
    EventRepository, MarkUsedOutcome, NotificationError, NotificationSender, SessionValidator,
    TicketConfirmation, TicketStore, UserDirectory, UserProfile,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory ticket store mirroring the store's consistency guarantees.
struct InMemoryTicketStore {
    tickets: Mutex<Vec<Ticket>>,
}

impl InMemoryTicketStore {
    fn new() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn create(&self, ticket: &Ticket, capacity: Option<u32>) -> Result<(), TicketingError> {
        let mut tickets = self.tickets.lock().unwrap();
        if tickets
            .iter()
            .any(|t| t.credential == ticket.credential)
        {
            return Err(TicketingError::DuplicateCredential);
        }
        if let Some(capacity) = capacity {
            let issued = tickets
                .iter()
                .filter(|t| t.event_id == ticket.event_id)
                .count() as u64;
            if issued >= u64::from(capacity) {
                return Err(TicketingError::capacity_exceeded(ticket.event_id, capacity));
            }
        }
        tickets.push(ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketingError> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == *id)
            .cloned())
    }

    async fn find_by_credential(
        &self,
        credential: &str,
    ) -> Result<Option<Ticket>, TicketingError> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.credential.as_str() == credential)
            .cloned())
    }

    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, TicketingError> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.event_id == *event_id)
            .count() as u64)
    }

    async fn mark_used(
        &self,
        credential: &str,
        at: Timestamp,
    ) -> Result<MarkUsedOutcome, TicketingError> {
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.credential.as_str() == credential)
            .ok_or(TicketingError::TicketNotFound)?;
        match ticket.used_at {
            Some(used_at) => Ok(MarkUsedOutcome::AlreadyUsed { used_at }),
            None => {
                ticket.used_at = Some(at);
                Ok(MarkUsedOutcome::Marked(ticket.clone()))
            }
        }
    }
}

struct FixedEventRepository {
    events: Vec<Event>,
}

#[async_trait]
impl EventRepository for FixedEventRepository {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, TicketingError> {
        Ok(self.events.iter().find(|e| e.id == *id).cloned())
    }
}

struct FixedUserDirectory;

#[async_trait]
impl UserDirectory for FixedUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, TicketingError> {
        Ok(Some(UserProfile {
            id: id.clone(),
            email: format!("{}@example.com", id),
            name: None,
        }))
    }
}

struct SilentNotificationSender;

#[async_trait]
impl NotificationSender for SilentNotificationSender {
    async fn send_confirmation(
        &self,
        _confirmation: &TicketConfirmation,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    event_id: EventId,
}

fn build_app(events: Vec<Event>) -> TestApp {
    let event_id = events.first().map(|e| e.id).unwrap_or_else(EventId::new);

    let state = TicketsAppState {
        events: Arc::new(FixedEventRepository { events }),
        tickets: Arc::new(InMemoryTicketStore::new()),
        users: Arc::new(FixedUserDirectory),
        notifications: Arc::new(SilentNotificationSender),
        rate_limiter: Arc::new(InMemoryRateLimiter::new(100, 60)),
    };

    let validator: AuthState = Arc::new(
        MockSessionValidator::new()
            .with_attendee("attendee-token", "user-1")
            .with_admin("admin-token", "gate-1"),
    ) as Arc<dyn SessionValidator>;

    let router = Router::new()
        .nest("/api", tickets_router())
        .with_state(state)
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    TestApp { router, event_id }
}

fn open_event() -> Event {
    Event::new(
        EventId::new(),
        "Concert Fantasia",
        "Alger",
        Timestamp::now(),
        2500,
        Some(100),
    )
}

async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn purchase(app: &TestApp, token: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/tickets",
        Some(token),
        Some(json!({ "event_id": app.event_id })),
    )
    .await
}

// =============================================================================
// Purchase
// =============================================================================

#[tokio::test]
async fn purchase_without_token_is_unauthorized() {
    let app = build_app(vec![open_event()]);
    let (status, _) = send(&app, "POST", "/api/tickets", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn purchase_returns_created_with_credential() {
    let app = build_app(vec![open_event()]);
    let (status, body) = purchase(&app, "attendee-token").await;

    assert_eq!(status, StatusCode::CREATED);
    let credential = body["credential"].as_str().unwrap();
    assert!(credential.starts_with("ticket:"));
    assert!(body["used_at"].is_null());
}

#[tokio::test]
async fn purchase_for_unknown_event_is_not_found() {
    let app = build_app(vec![open_event()]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/tickets",
        Some("attendee-token"),
        Some(json!({ "event_id": EventId::new() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn sold_out_event_returns_conflict() {
    let mut event = open_event();
    event.capacity = Some(1);
    let app = build_app(vec![event]);

    let (first, _) = purchase(&app, "attendee-token").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = purchase(&app, "attendee-token").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
}

#[tokio::test]
async fn webhook_issues_without_session() {
    let app = build_app(vec![open_event()]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/webhooks/payment",
        None,
        Some(json!({ "event_id": app.event_id, "user_id": "user-9" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["credential"].as_str().unwrap().contains("user-9"));
}

// =============================================================================
// Gate validation
// =============================================================================

#[tokio::test]
async fn gate_lookup_requires_admin() {
    let app = build_app(vec![open_event()]);

    let (status, _) = send(
        &app,
        "GET",
        "/api/tickets/validate?code=whatever",
        Some("attendee-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/tickets/validate?code=whatever", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_lookup_reports_valid_without_consuming() {
    let app = build_app(vec![open_event()]);
    let (_, purchased) = purchase(&app, "attendee-token").await;
    let credential = purchased["credential"].as_str().unwrap();

    let uri = format!("/api/tickets/validate?code={}", credential);
    let (status, body) = send(&app, "GET", &uri, Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "valid");

    // A second lookup still sees the ticket as unredeemed.
    let (_, body) = send(&app, "GET", &uri, Some("admin-token"), None).await;
    assert_eq!(body["status"], "valid");
}

#[tokio::test]
async fn unknown_credential_lookup_is_not_found() {
    let app = build_app(vec![open_event()]);
    let (status, body) = send(
        &app,
        "GET",
        "/api/tickets/validate?code=no-such-ticket",
        Some("admin-token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TICKET_NOT_FOUND");
}

#[tokio::test]
async fn redemption_succeeds_once_then_conflicts() {
    let app = build_app(vec![open_event()]);
    let (_, purchased) = purchase(&app, "attendee-token").await;
    let credential = purchased["credential"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/tickets/validate",
        Some("admin-token"),
        Some(json!({ "code": credential })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation_code"].as_str().unwrap().len(), 8);
    assert!(!body["display_name"].as_str().unwrap().is_empty());
    let first_used_at = body["ticket"]["used_at"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/tickets/validate",
        Some("admin-token"),
        Some(json!({ "code": credential })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TICKET_ALREADY_USED");
    // The original redemption time is reported, not overwritten.
    assert_eq!(body["used_at"].as_str().unwrap(), first_used_at);

    // The gate lookup agrees.
    let uri = format!("/api/tickets/validate?code={}", credential);
    let (_, body) = send(&app, "GET", &uri, Some("admin-token"), None).await;
    assert_eq!(body["status"], "used");
}

#[tokio::test]
async fn redemption_outside_window_is_rejected() {
    let mut event = open_event();
    event.date = Timestamp::now().add_days(10);
    let app = build_app(vec![event]);
    let (_, purchased) = purchase(&app, "attendee-token").await;
    let credential = purchased["credential"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/tickets/validate",
        Some("admin-token"),
        Some(json!({ "code": credential })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EVENT_NOT_OPEN");

    // The rejection must not consume the ticket.
    let uri = format!("/api/tickets/validate?code={}", credential);
    let (_, body) = send(&app, "GET", &uri, Some("admin-token"), None).await;
    assert_eq!(body["status"], "not_yet_open");
}

// =============================================================================
// Owner fetch
// =============================================================================

#[tokio::test]
async fn owner_can_fetch_their_ticket_by_id() {
    let app = build_app(vec![open_event()]);
    let (_, purchased) = purchase(&app, "attendee-token").await;
    let ticket_id = purchased["ticket_id"].as_str().unwrap();

    let uri = format!("/api/tickets/{}", ticket_id);
    let (status, body) = send(&app, "GET", &uri, Some("attendee-token"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["ticket_id"], *ticket_id);
    assert_eq!(body["event"]["title"], "Concert Fantasia");
}

#[tokio::test]
async fn stranger_cannot_fetch_someone_elses_ticket() {
    let app = build_app(vec![open_event()]);

    // Mint a ticket for user-9 through the webhook, then read it back with
    // user-1's session.
    let (_, minted) = send(
        &app,
        "POST",
        "/api/webhooks/payment",
        None,
        Some(json!({ "event_id": app.event_id, "user_id": "user-9" })),
    )
    .await;
    let ticket_id = minted["ticket_id"].as_str().unwrap();

    let uri = format!("/api/tickets/{}", ticket_id);
    let (status, body) = send(&app, "GET", &uri, Some("attendee-token"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TICKET_NOT_FOUND");

    // The gate admin can read any ticket.
    let (status, _) = send(&app, "GET", &uri, Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
}
