//! Slicing yearly event logs into single days

use super::on_duration;
use crate::core::{Day, Event, Minutes, PowerState, DAYS_IN_YEAR};
use serde::{Deserialize, Serialize};

/// Minutes spent `on` during `day`.
///
/// `events` must be sorted by timestamp, as produced by
/// [`crate::sanitize::sanitize_yearly`]. The state at the start of the day is
/// the state of the last event before it, or `initial` if there is none.
pub fn day_usage(initial: PowerState, events: &[Event<PowerState>], day: Day) -> Minutes {
    let start = day.start();
    let end = day.end();

    let first = events.partition_point(|event| event.timestamp < start);
    let past_end = events.partition_point(|event| event.timestamp < end);

    let carried = events[..first].last().map_or(initial, |event| event.state);
    let rebased: Vec<Event<PowerState>> = events[first..past_end]
        .iter()
        .map(|event| Event::new(event.timestamp - start, event.state))
        .collect();

    log::debug!(
        "Day {}: starts {}, {} events in range",
        day,
        carried,
        rebased.len()
    );

    on_duration(carried, &rebased)
}

/// Per-day on-time for a whole year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearUsage {
    /// Minutes on for each day, index 0 is day 1
    pub days: Vec<Minutes>,
    /// Sum of `days`
    pub total_minutes: u64,
}

impl YearUsage {
    /// Minutes on during `day`, `None` when the breakdown does not cover it
    pub fn day(&self, day: Day) -> Option<Minutes> {
        self.days.get((day.number() - 1) as usize).copied()
    }

    /// Days with at least one minute on
    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|&&minutes| minutes > 0).count()
    }
}

/// [`day_usage`] for every day of the year. `events` must be sorted.
pub fn year_usage(initial: PowerState, events: &[Event<PowerState>]) -> YearUsage {
    let mut days = Vec::with_capacity(DAYS_IN_YEAR as usize);
    for day in Day::all() {
        days.push(day_usage(initial, events, day));
    }
    let total_minutes = days.iter().map(|&minutes| u64::from(minutes)).sum();

    YearUsage { days, total_minutes }
}
