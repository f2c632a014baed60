//! Energy savings from the automatic power-saving mode
//!
//! Counts the minutes an appliance spent in `auto-off` after being switched
//! there from `on`. Two transitions are suppressed and leave the state as is:
//!
//! - `auto-off` while not `on`: auto-off cannot switch off an appliance that
//!   is already off, so no window opens.
//! - `off` while in `auto-off`: the manual signal is treated as noise and the
//!   open auto-off window keeps running until the next `on`.

use crate::core::{Event, Minutes, SaverState, Timestamp, MAX_IN_PERIOD};

/// Minutes saved by `auto-off` during one period.
///
/// Expects events sorted by timestamp, as produced by
/// [`crate::sanitize::sanitize_daily`]. With no events at all, an appliance
/// starting in `auto-off` saves the whole period.
pub fn auto_off_duration(initial: SaverState, events: &[Event<SaverState>]) -> Minutes {
    let period_end = Timestamp::from(MAX_IN_PERIOD);

    if events.is_empty() {
        return if initial == SaverState::AutoOff { MAX_IN_PERIOD } else { 0 };
    }

    let mut state = initial;
    let mut auto_off_start: Option<Timestamp> = None;
    let mut total_saved: Timestamp = 0;

    for event in events {
        let at = event.timestamp.min(period_end);

        if event.state == SaverState::On {
            if let Some(start) = auto_off_start.take() {
                total_saved += at.saturating_sub(start);
            }
        }

        match (state, event.state) {
            (SaverState::On, SaverState::AutoOff) => {
                auto_off_start = Some(at);
            }
            (SaverState::AutoOff, SaverState::Off) => {
                log::trace!("Ignoring off at {} during auto-off", at);
                continue;
            }
            (_, SaverState::AutoOff) => {
                log::trace!("Ignoring auto-off at {} while {}", at, state);
                continue;
            }
            _ => {}
        }

        state = event.state;
    }

    if let Some(start) = auto_off_start {
        total_saved += period_end.saturating_sub(start);
    }

    total_saved.min(period_end) as Minutes
}
