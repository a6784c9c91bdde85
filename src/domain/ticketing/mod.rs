//! Ticketing domain - the ticket lifecycle.
//!
//! # Module Organization
//!
//! - `event` - Event entity (read model for issuance and validation)
//! - `ticket` - Ticket entity and its unused -> used lifecycle
//! - `credential` - Opaque scannable credential codec
//! - `capacity` - Capacity guard for issuance
//! - `window` - Validity-window policy around the event date
//! - `gate_display` - Cosmetic display name / validation code for gate staff
//! - `errors` - Ticketing error taxonomy

mod capacity;
mod credential;
mod errors;
mod event;
mod gate_display;
mod ticket;
mod window;

pub use capacity::may_issue;
pub use credential::{Credential, DecodedCredential, CREDENTIAL_PREFIX};
pub use errors::TicketingError;
pub use event::Event;
pub use gate_display::{generate_display_name, generate_validation_code};
pub use ticket::Ticket;
pub use window::{evaluate_window, WindowCheck};
