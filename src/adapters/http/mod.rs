//! HTTP adapters - axum handlers, routes, and middleware.

pub mod middleware;
pub mod ticketing;
