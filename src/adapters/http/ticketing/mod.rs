//! HTTP adapters for the ticketing endpoints.
//!
//! - `dto` - request/response types crossing the HTTP boundary
//! - `handlers` - axum handlers bridging routes to application handlers
//! - `routes` - router wiring

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TicketsAppState;
pub use routes::{tickets_router, tickets_routes, webhook_routes};
