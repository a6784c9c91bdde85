//! Application layer - command and query handlers.
//!
//! Handlers orchestrate the domain and the ports. They hold no state of
//! their own beyond the ports they depend on, and they are the only place
//! where a use case's steps are sequenced.

pub mod handlers;
