//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresTicketStore` - capacity-checked inserts and atomic redemption
//! - `PostgresEventRepository` - event lookups
//! - `PostgresUserDirectory` - user profile lookups

mod event_repository;
mod ticket_store;
mod user_directory;

pub use event_repository::PostgresEventRepository;
pub use ticket_store::PostgresTicketStore;
pub use user_directory::PostgresUserDirectory;
