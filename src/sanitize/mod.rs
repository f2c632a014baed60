//! Event sanitization
//!
//! Turns raw telemetry entries into a chronologically ordered list of typed
//! events. Entries that are null, not objects, carry a non-integral or
//! negative timestamp, fall outside the allowed range, or name a state
//! outside the domain are dropped without error.
//!
//! Ordering is a stable sort on the timestamp: entries sharing a timestamp
//! keep their relative input order, so the later one wins in the reducers.

use crate::core::{ApplianceState, Event, PowerState, Timestamp, MAX_IN_PERIOD};
use serde_json::Value;

/// Keep events inside a single period (`0 <= timestamp < MAX_IN_PERIOD`)
pub fn sanitize_daily<S: ApplianceState>(events: &[Value]) -> Vec<Event<S>> {
    sanitize_within(events, Some(Timestamp::from(MAX_IN_PERIOD)))
}

/// Keep two-state events anywhere in the year (`timestamp >= 0`)
pub fn sanitize_yearly(events: &[Value]) -> Vec<Event<PowerState>> {
    sanitize_within(events, None)
}

fn sanitize_within<S: ApplianceState>(events: &[Value], upper: Option<Timestamp>) -> Vec<Event<S>> {
    let mut kept: Vec<Event<S>> = events
        .iter()
        .filter_map(Event::from_value)
        .filter(|event| upper.map_or(true, |limit| event.timestamp < limit))
        .collect();

    let dropped = events.len() - kept.len();
    if dropped > 0 {
        log::debug!("Dropped {} of {} malformed or out-of-range events", dropped, events.len());
    }

    // sort_by_key is stable
    kept.sort_by_key(|event| event.timestamp);
    kept
}
