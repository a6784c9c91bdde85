//! Validity-window policy.
//!
//! A ticket may be redeemed from one day before the event date through one
//! day after it, boundaries inclusive. Outside that window the check reports
//! which side was missed so the gate can tell "come back tomorrow" apart
//! from "the event is over".

use chrono::Duration;

use crate::domain::foundation::Timestamp;

/// Outcome of checking a redemption attempt against the event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCheck {
    /// Within one day of the event date, either side.
    Open,
    /// More than one day before the event date.
    NotYetOpen,
    /// More than one day after the event date.
    Ended,
}

/// Evaluates the validity window for a redemption attempt at `now` against
/// an event taking place at `event_date`.
pub fn evaluate_window(event_date: Timestamp, now: Timestamp) -> WindowCheck {
    let until_event = event_date.duration_since(&now);
    if until_event > Duration::days(1) {
        WindowCheck::NotYetOpen
    } else if until_event < Duration::days(-1) {
        WindowCheck::Ended
    } else {
        WindowCheck::Open
    }
}
