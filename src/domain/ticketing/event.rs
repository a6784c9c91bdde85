//! Event entity.
//!
//! Events are created and edited by admin tooling outside this core; here
//! they are a read model consulted by issuance (capacity) and validation
//! (date window).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp};

/// An event tickets can be issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub location: String,
    /// When the event takes place.
    pub date: Timestamp,
    /// Price in minor currency units (e.g. cents).
    pub price_cents: i64,
    /// Maximum number of tickets; `None` means unbounded.
    pub capacity: Option<u32>,
}

impl Event {
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        location: impl Into<String>,
        date: Timestamp,
        price_cents: i64,
        capacity: Option<u32>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            location: location.into(),
            date,
            price_cents,
            capacity,
        }
    }

    /// Whether ticket issuance for this event is bounded.
    pub fn has_finite_capacity(&self) -> bool {
        self.capacity.is_some()
    }
}
