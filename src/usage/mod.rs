//! On-time accounting for two-state (on/off) appliances
//!
//! [`on_duration`] reduces one period of sanitized events to the number of
//! minutes spent on. The [`day`] submodule slices yearly event logs into
//! periods and feeds them through the same reducer.

mod day;

pub use day::{day_usage, year_usage, YearUsage};

use crate::core::{ApplianceState, Event, Minutes, PowerState, Timestamp, MAX_IN_PERIOD};

/// Minutes spent `on` during one period.
///
/// Expects events sorted by timestamp, as produced by
/// [`crate::sanitize::sanitize_daily`]. Events repeating the current state or
/// going back in time are ignored. An appliance still on after the last
/// event stays on until the end of the period.
pub fn on_duration(initial: PowerState, events: &[Event<PowerState>]) -> Minutes {
    let period_end = Timestamp::from(MAX_IN_PERIOD);

    let mut state = initial;
    let mut last_change: Timestamp = 0;
    let mut total: Timestamp = 0;

    for event in events {
        if event.timestamp < last_change || event.state == state {
            continue;
        }

        let at = event.timestamp.min(period_end);
        if state.is_on() {
            total += at - last_change;
        }

        state = event.state;
        last_change = at;
    }

    if state.is_on() {
        total += period_end - last_change;
    }

    // total never exceeds one period
    total.min(period_end) as Minutes
}

/// Minutes spent `off` given the minutes spent `on` in the same period
pub fn off_minutes(on: Minutes) -> Minutes {
    MAX_IN_PERIOD.saturating_sub(on)
}
