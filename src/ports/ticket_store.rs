//! Ticket store port.
//!
//! The store owns the two consistency guarantees the domain cannot provide
//! on its own:
//!
//! - **Capacity**: `create` counts issued tickets and inserts the new one in
//!   a single transaction, so two concurrent purchases of the last seat
//!   cannot both succeed.
//! - **At-most-once redemption**: `mark_used` is a conditional update that
//!   only fires if the ticket is still unused, so two concurrent scans of
//!   the same ticket see exactly one `Marked` outcome.

use async_trait::async_trait;

use crate::domain::foundation::{EventId, TicketId, Timestamp};
use crate::domain::ticketing::{Ticket, TicketingError};

/// Outcome of a redemption attempt against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkUsedOutcome {
    /// The ticket transitioned from unused to used; the returned ticket
    /// carries the new `used_at`.
    Marked(Ticket),
    /// Someone else redeemed it first; `used_at` is the original
    /// redemption time.
    AlreadyUsed { used_at: Timestamp },
}

/// Port for ticket persistence.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persists a freshly issued ticket, enforcing the event's capacity.
    ///
    /// When `capacity` is `Some(n)`, the count of existing tickets for the
    /// event and the insert must happen atomically; the insert is rejected
    /// with `CapacityExceeded` if `n` tickets already exist.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` if the event is sold out
    /// - `DuplicateCredential` if the credential already exists
    /// - `Infrastructure` on persistence failure
    async fn create(&self, ticket: &Ticket, capacity: Option<u32>) -> Result<(), TicketingError>;

    /// Looks up a ticket by its ID.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketingError>;

    /// Looks up a ticket by its exact credential string.
    ///
    /// Returns `None` if no ticket carries this credential. The credential
    /// is treated as an opaque key; no decoding happens here.
    async fn find_by_credential(&self, credential: &str)
        -> Result<Option<Ticket>, TicketingError>;

    /// Counts tickets issued for an event.
    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, TicketingError>;

    /// Atomically marks a ticket as used at `at` if it is still unused.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket does not exist
    /// - `Infrastructure` on persistence failure
    async fn mark_used(
        &self,
        credential: &str,
        at: Timestamp,
    ) -> Result<MarkUsedOutcome, TicketingError>;
}
