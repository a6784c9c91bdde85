//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, auth)
//! - `ticketing` - Ticket lifecycle: credentials, capacity, validity window

pub mod foundation;
pub mod ticketing;
