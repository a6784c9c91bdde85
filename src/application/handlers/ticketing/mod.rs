//! Ticketing use cases.
//!
//! - `issue_ticket` - purchase flow: capacity check, credential mint, persist,
//!   fire-and-forget confirmation
//! - `check_ticket` - read-only credential lookup for the gate screen
//! - `confirm_ticket` - admin redemption: window check plus atomic mark-used
//! - `get_ticket` - owner-scoped ticket lookup for client-side rendering

mod check_ticket;
mod confirm_ticket;
mod get_ticket;
mod issue_ticket;

pub use check_ticket::{CheckTicketHandler, CheckTicketQuery, CheckTicketResult};
pub use confirm_ticket::{ConfirmTicketCommand, ConfirmTicketHandler, ConfirmTicketResult};
pub use get_ticket::{GetTicketHandler, GetTicketQuery, GetTicketResult};
pub use issue_ticket::{IssueTicketCommand, IssueTicketHandler, IssueTicketResult};
