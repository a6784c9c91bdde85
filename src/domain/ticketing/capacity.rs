//! Capacity guard.
//!
//! Pure count-then-compare decision: issuance is allowed while the number of
//! already-issued tickets is strictly below the event's capacity. Events
//! without a capacity are unbounded. The guard itself is race-free only when
//! the count and the subsequent insert happen inside one transaction; the
//! store is responsible for that.

use super::Event;

/// Whether one more ticket may be issued for `event` given the number of
/// tickets already issued.
pub fn may_issue(event: &Event, issued_count: u64) -> bool {
    match event.capacity {
        Some(capacity) => issued_count < u64::from(capacity),
        None => true,
    }
}
