//! Adapters - Concrete implementations of the ports.
//!
//! - `postgres` - sqlx-backed persistence
//! - `email` - outbound confirmation delivery over HTTP
//! - `auth` - session token validation
//! - `rate_limiter` - in-memory fixed-window throttling
//! - `http` - axum handlers, routes, and middleware

pub mod auth;
pub mod email;
pub mod http;
pub mod postgres;
pub mod rate_limiter;
