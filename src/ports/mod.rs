//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TicketStore` - Ticket persistence, capacity-checked creation, redemption
//! - `EventRepository` - Read access to events
//! - `UserDirectory` - Read access to user profiles for notifications
//! - `NotificationSender` - Outbound ticket confirmation delivery
//! - `SessionValidator` - Session token validation
//! - `RateLimiter` - Request throttling for the public endpoints

mod event_repository;
mod notification_sender;
mod rate_limiter;
mod session_validator;
mod ticket_store;
mod user_directory;

pub use event_repository::EventRepository;
pub use notification_sender::{NotificationError, NotificationSender, TicketConfirmation};
pub use rate_limiter::{RateLimitError, RateLimitKey, RateLimitResult, RateLimiter};
pub use session_validator::SessionValidator;
pub use ticket_store::{MarkUsedOutcome, TicketStore};
pub use user_directory::{UserDirectory, UserProfile};
