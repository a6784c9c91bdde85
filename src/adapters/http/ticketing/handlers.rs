//! HTTP handlers for ticketing endpoints.
//!
//! These handlers connect axum routes to the application layer. Auth is
//! enforced by the extractors from `middleware::auth`; the payment webhook
//! is mounted on a separate router that skips them (the payment provider's
//! signature is verified upstream).

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::ticketing::{
    CheckTicketHandler, CheckTicketQuery, ConfirmTicketCommand, ConfirmTicketHandler,
    GetTicketHandler, GetTicketQuery, IssueTicketCommand, IssueTicketHandler,
};
use crate::domain::foundation::TicketId;
use crate::domain::ticketing::TicketingError;
use crate::ports::{
    EventRepository, NotificationSender, RateLimitKey, RateLimitResult, RateLimiter, TicketStore,
    UserDirectory,
};

use super::dto::{
    CheckTicketResponse, ConfirmTicketRequest, ConfirmTicketResponse, ErrorResponse,
    GetTicketResponse, PaymentWebhookRequest, PurchaseTicketRequest, TicketResponse,
    ValidateQuery,
};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};

/// Shared application state containing all ticketing dependencies.
///
/// Cloned per request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct TicketsAppState {
    pub events: Arc<dyn EventRepository>,
    pub tickets: Arc<dyn TicketStore>,
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationSender>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl TicketsAppState {
    pub fn issue_handler(&self) -> IssueTicketHandler {
        IssueTicketHandler::new(
            self.events.clone(),
            self.tickets.clone(),
            self.users.clone(),
            self.notifications.clone(),
        )
    }

    pub fn check_handler(&self) -> CheckTicketHandler {
        CheckTicketHandler::new(self.tickets.clone(), self.events.clone())
    }

    pub fn confirm_handler(&self) -> ConfirmTicketHandler {
        ConfirmTicketHandler::new(self.tickets.clone(), self.events.clone())
    }

    pub fn get_handler(&self) -> GetTicketHandler {
        GetTicketHandler::new(self.tickets.clone(), self.events.clone())
    }
}

/// `POST /api/tickets` - purchase a ticket for an event.
pub async fn purchase_ticket(
    State(state): State<TicketsAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<PurchaseTicketRequest>,
) -> Result<impl IntoResponse, TicketApiError> {
    enforce_rate_limit(&state, RateLimitKey::user(&user.id, "purchase")).await?;

    let result = state
        .issue_handler()
        .handle(IssueTicketCommand {
            event_id: request.event_id,
            user_id: user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(&result.ticket))))
}

/// `POST /api/webhooks/payment` - issuance triggered by the payment provider.
pub async fn payment_webhook(
    State(state): State<TicketsAppState>,
    Json(request): Json<PaymentWebhookRequest>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .issue_handler()
        .handle(IssueTicketCommand {
            event_id: request.event_id,
            user_id: request.user_id,
        })
        .await?;

    Ok((StatusCode::OK, Json(TicketResponse::from(&result.ticket))))
}

/// `GET /api/tickets/validate?code=...` - read-only gate lookup.
pub async fn check_ticket(
    State(state): State<TicketsAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ValidateQuery>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .check_handler()
        .handle(CheckTicketQuery {
            credential: query.code,
        })
        .await?;

    Ok(Json(CheckTicketResponse::from_parts(
        &result.ticket,
        &result.event,
        result.window,
    )))
}

/// `POST /api/tickets/validate` - redeem a ticket at the gate.
pub async fn confirm_ticket(
    State(state): State<TicketsAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<ConfirmTicketRequest>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .confirm_handler()
        .handle(ConfirmTicketCommand {
            credential: request.code,
        })
        .await?;

    Ok(Json(ConfirmTicketResponse {
        ticket: TicketResponse::from(&result.ticket),
        event: (&result.event).into(),
        display_name: result.display_name,
        validation_code: result.validation_code,
    }))
}

/// `GET /api/tickets/:id` - fetch one of the caller's tickets.
pub async fn get_ticket(
    State(state): State<TicketsAppState>,
    RequireAuth(user): RequireAuth,
    Path(ticket_id): Path<TicketId>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .get_handler()
        .handle(GetTicketQuery {
            ticket_id,
            caller: user,
        })
        .await?;

    Ok(Json(GetTicketResponse {
        ticket: TicketResponse::from(&result.ticket),
        event: (&result.event).into(),
    }))
}

async fn enforce_rate_limit(
    state: &TicketsAppState,
    key: RateLimitKey,
) -> Result<(), TicketApiError> {
    match state.rate_limiter.check(key).await {
        Ok(RateLimitResult::Allowed { .. }) => Ok(()),
        Ok(RateLimitResult::Denied { retry_after_secs }) => {
            Err(TicketApiError::RateLimited { retry_after_secs })
        }
        Err(e) => {
            // A broken limiter should not take purchases down with it.
            tracing::warn!("rate limiter unavailable: {}", e);
            Ok(())
        }
    }
}

/// Error wrapper translating `TicketingError` to HTTP responses.
#[derive(Debug)]
pub enum TicketApiError {
    Ticketing(TicketingError),
    RateLimited { retry_after_secs: u32 },
}

impl From<TicketingError> for TicketApiError {
    fn from(err: TicketingError) -> Self {
        Self::Ticketing(err)
    }
}

impl IntoResponse for TicketApiError {
    fn into_response(self) -> axum::response::Response {
        let err = match self {
            TicketApiError::RateLimited { retry_after_secs } => {
                let body = ErrorResponse::new(
                    "RATE_LIMITED",
                    format!("Too many requests; retry in {}s", retry_after_secs),
                );
                return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            }
            TicketApiError::Ticketing(err) => err,
        };

        let status = match &err {
            TicketingError::EventNotFound(_) | TicketingError::TicketNotFound => {
                StatusCode::NOT_FOUND
            }
            TicketingError::MalformedCredential(_)
            | TicketingError::EventEnded
            | TicketingError::NotYetOpen => StatusCode::BAD_REQUEST,
            TicketingError::CapacityExceeded { .. }
            | TicketingError::DuplicateCredential
            | TicketingError::AlreadyUsed { .. } => StatusCode::CONFLICT,
            TicketingError::IssuanceFailed(_) | TicketingError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("ticketing request failed: {}", err);
        }

        let mut body = ErrorResponse::new(err.code().to_string(), err.to_string());
        if let TicketingError::AlreadyUsed { used_at, .. } = &err {
            body = body.with_used_at(used_at.to_string());
        }

        (status, Json(body)).into_response()
    }
}
