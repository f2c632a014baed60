//! Public calculations over JSON usage profiles
//!
//! Each operation validates the profile shape first and fails as a whole
//! on a missing profile, an unknown initial state or a non-array `events`.
//! Individual malformed events are dropped by the sanitizer instead.
//! Errors come back wrapped in [`Error::Calculation`] naming the operation.

use crate::core::{Day, Error, Minutes, PowerState, Profile, Result, SaverState};
use crate::sanitize::{sanitize_daily, sanitize_yearly};
use crate::savings::auto_off_duration;
use crate::usage::{day_usage, on_duration, year_usage, YearUsage};
use serde_json::Value;
use std::fmt;

/// Names the public calculation in wrapped errors
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Usage,
    UsageForDay(String),
    UsageForYear,
    Savings,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Usage => f.write_str("energy usage"),
            Operation::UsageForDay(day) => write!(f, "energy usage for day {}", day),
            Operation::UsageForYear => f.write_str("energy usage for year"),
            Operation::Savings => f.write_str("energy savings"),
        }
    }
}

/// Minutes the appliance was on during a single day.
///
/// `profile` is `{ "initial": "on" | "off", "events": [...] }` with event
/// timestamps in `0..1440`.
pub fn usage_simple(profile: &Value) -> Result<Minutes> {
    let run = || -> Result<Minutes> {
        let profile = Profile::<PowerState>::from_json(profile)?;
        let events = sanitize_daily::<PowerState>(&profile.events);
        Ok(on_duration(profile.initial, &events))
    };
    run().map_err(|e| fail(e, Operation::Usage))
}

/// Minutes the appliance was on during `day` (1-365) of a yearly profile.
///
/// Event timestamps count minutes from the start of day 1. `day` must be a
/// whole JSON number; it is checked before the profile.
pub fn usage_for_day(profile: &Value, day: impl Into<Value>) -> Result<Minutes> {
    let day = day.into();
    let run = || -> Result<Minutes> {
        let day = Day::from_value(&day)?;
        let profile = Profile::<PowerState>::from_json(profile)?;
        let events = sanitize_yearly(&profile.events);
        Ok(day_usage(profile.initial, &events, day))
    };
    run().map_err(|e| fail(e, Operation::UsageForDay(day_label(&day))))
}

// Strings are shown bare, anything else in its JSON form
fn day_label(day: &Value) -> String {
    match day {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Per-day on-time for every day of a yearly profile
pub fn usage_for_year(profile: &Value) -> Result<YearUsage> {
    let run = || -> Result<YearUsage> {
        let profile = Profile::<PowerState>::from_json(profile)?;
        let events = sanitize_yearly(&profile.events);
        Ok(year_usage(profile.initial, &events))
    };
    run().map_err(|e| fail(e, Operation::UsageForYear))
}

/// Minutes saved by `auto-off` during a single day.
///
/// `profile` is `{ "initial": "on" | "off" | "auto-off", "events": [...] }`.
pub fn energy_savings(profile: &Value) -> Result<Minutes> {
    let run = || -> Result<Minutes> {
        let profile = Profile::<SaverState>::from_json(profile)?;
        let events = sanitize_daily::<SaverState>(&profile.events);
        Ok(auto_off_duration(profile.initial, &events))
    };
    run().map_err(|e| fail(e, Operation::Savings))
}

fn fail(err: Error, operation: Operation) -> Error {
    log::warn!("{} rejected: {}", operation, err);
    err.in_operation(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DayError, MAX_IN_PERIOD};
    use serde_json::json;

    fn month_profile() -> Value {
        json!({
            "initial": "on",
            "events": [
                { "state": "off", "timestamp": 500 },
                { "state": "on", "timestamp": 900 },
                { "state": "off", "timestamp": 1400 },
                { "state": "on", "timestamp": 1700 },
                { "state": "off", "timestamp": 1900 },
                { "state": "on", "timestamp": 2599 },
                { "state": "off", "timestamp": 2900 },
                { "state": "on", "timestamp": 3000 },
                { "state": "off", "timestamp": 3500 },
                { "state": "on", "timestamp": 4000 },
                { "state": "off", "timestamp": 4420 },
                { "state": "on", "timestamp": 4500 },
            ],
        })
    }

    #[test]
    fn test_usage_simple_initial_on() {
        let profile = json!({
            "initial": "on",
            "events": [
                { "timestamp": 126, "state": "off" },
                { "timestamp": 833, "state": "on" },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 733);
    }

    #[test]
    fn test_usage_simple_whole_day() {
        assert_eq!(usage_simple(&json!({ "initial": "on", "events": [] })).unwrap(), MAX_IN_PERIOD);
        assert_eq!(usage_simple(&json!({ "initial": "off", "events": [] })).unwrap(), 0);
    }

    #[test]
    fn test_usage_simple_skips_null_timestamps() {
        let profile = json!({
            "initial": "on",
            "events": [
                { "timestamp": null, "state": "off" },
                { "timestamp": 100, "state": "off" },
                { "state": "on" },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 100);
    }

    #[test]
    fn test_usage_simple_ignores_invalid_states() {
        let profile = json!({
            "initial": "on",
            "events": [
                { "timestamp": 100, "state": "maybe" },
                { "timestamp": 200, "state": "off" },
                { "timestamp": 300 },
                { "timestamp": 400, "state": null },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 200);
    }

    #[test]
    fn test_usage_simple_skips_out_of_range() {
        let profile = json!({
            "initial": "on",
            "events": [
                { "timestamp": -50, "state": "off" },
                { "timestamp": 50, "state": "off" },
                { "timestamp": 2000, "state": "on" },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 50);
    }

    #[test]
    fn test_usage_simple_floors_fractional_timestamps() {
        let profile = json!({
            "initial": "on",
            "events": [{ "timestamp": 100.5, "state": "off" }],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 100);

        // 1439.5 floors into the last minute of the day
        let profile = json!({
            "initial": "off",
            "events": [{ "timestamp": 1439.5, "state": "on" }],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 1);
    }

    #[test]
    fn test_usage_simple_unsorted() {
        let profile = json!({
            "initial": "on",
            "events": [
                { "timestamp": 300, "state": "off" },
                { "timestamp": 100, "state": "off" },
                { "timestamp": 200, "state": "on" },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), 100 + (300 - 200));
    }

    #[test]
    fn test_usage_simple_junk_mixed_in() {
        let profile = json!({
            "initial": "off",
            "events": [
                { "timestamp": "bad", "state": "on" },
                { "timestamp": 50, "state": "on" },
                { "timestamp": 100, "state": "off" },
                null,
                { "timestamp": 150, "state": "on" },
                { "timestamp": 300, "state": "off" },
            ],
        });
        assert_eq!(usage_simple(&profile).unwrap(), (100 - 50) + (300 - 150));
    }

    #[test]
    fn test_usage_simple_invalid_profile() {
        let bad = [
            json!(null),
            json!("on"),
            json!({ "initial": null, "events": [{ "timestamp": 100 }, { "state": "off" }] }),
            json!({ "initial": "auto-off", "events": [] }),
            json!({ "initial": "on" }),
            json!({ "initial": "on", "events": "none" }),
        ];
        for profile in bad {
            let err = usage_simple(&profile).unwrap_err();
            assert!(err.is_invalid_profile(), "{profile}");
            assert!(err.to_string().starts_with("Failed to calculate energy usage: "));
        }
    }

    #[test]
    fn test_usage_for_day_month_profile() {
        let profile = month_profile();
        assert_eq!(usage_for_day(&profile, 1).unwrap(), 500 + (1400 - 900));
        assert_eq!(usage_for_day(&profile, 2).unwrap(), (1900 - 1700) + (2880 - 2599));
        assert_eq!(usage_for_day(&profile, 4).unwrap(), (4420 - 4320) + (5760 - 4500));
        assert_eq!(usage_for_day(&profile, 5).unwrap(), MAX_IN_PERIOD);
        assert_eq!(usage_for_day(&profile, 6).unwrap(), MAX_IN_PERIOD);
    }

    #[test]
    fn test_usage_for_day_empty_events() {
        assert_eq!(usage_for_day(&json!({ "initial": "off", "events": [] }), 10).unwrap(), 0);
        assert_eq!(usage_for_day(&json!({ "initial": "on", "events": [] }), 5).unwrap(), MAX_IN_PERIOD);
    }

    #[test]
    fn test_usage_for_day_late_first_event() {
        let profile = json!({ "initial": "off", "events": [{ "timestamp": 4500, "state": "on" }] });
        assert_eq!(usage_for_day(&profile, 2).unwrap(), 0);
        assert_eq!(usage_for_day(&profile, 4).unwrap(), 1260);
        assert_eq!(usage_for_day(&profile, 15).unwrap(), MAX_IN_PERIOD);
    }

    #[test]
    fn test_usage_for_day_out_of_range() {
        let profile = month_profile();
        for day in [-5i64, 0, 366] {
            let err = usage_for_day(&profile, day).unwrap_err();
            assert!(err.to_string().contains("day out of range"), "{err}");
            assert!(matches!(err.root_cause(), Error::InvalidDay(DayError::OutOfRange(d)) if *d == day));
        }
    }

    #[test]
    fn test_usage_for_day_non_integer() {
        let err = usage_for_day(&month_profile(), 3.76).unwrap_err();
        assert!(err.to_string().contains("must be an integer"));
        assert!(err.to_string().starts_with("Failed to calculate energy usage for day 3.76"));

        // day is checked before the profile
        let err = usage_for_day(&Value::Null, 3.76).unwrap_err();
        assert!(matches!(err.root_cause(), Error::InvalidDay(DayError::NotAnInteger)));
    }

    #[test]
    fn test_usage_for_day_string_selector() {
        let err = usage_for_day(&month_profile(), "abc").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to calculate energy usage for day abc:"), "{message}");
        assert!(message.contains("must be an integer"));
        assert!(!message.contains('"'));
    }

    #[test]
    fn test_usage_for_day_invalid_profile() {
        let err = usage_for_day(&json!({ "initial": "auto-off", "events": [] }), 3).unwrap_err();
        assert!(err.is_invalid_profile());
    }

    #[test]
    fn test_usage_for_year_matches_days() {
        let profile = month_profile();
        let year = usage_for_year(&profile).unwrap();
        for day in [1, 2, 3, 4, 5, 200, 365] {
            assert_eq!(year.days[day - 1], usage_for_day(&profile, day as i64).unwrap());
        }
    }

    #[test]
    fn test_energy_savings_scenario() {
        let profile = json!({
            "initial": "off",
            "events": [
                { "state": "on", "timestamp": 100 },
                { "state": "off", "timestamp": 150 },
                { "state": "on", "timestamp": 200 },
                { "state": "auto-off", "timestamp": 500 },
                { "state": "on", "timestamp": 933 },
                { "state": "off", "timestamp": 1010 },
                { "state": "on", "timestamp": 1250 },
                { "state": "auto-off", "timestamp": 1320 },
            ],
        });
        assert_eq!(energy_savings(&profile).unwrap(), 553);
    }

    #[test]
    fn test_energy_savings_closure() {
        assert_eq!(energy_savings(&json!({ "initial": "auto-off", "events": [] })).unwrap(), MAX_IN_PERIOD);
        assert_eq!(energy_savings(&json!({ "initial": "on", "events": [] })).unwrap(), 0);
    }

    #[test]
    fn test_energy_savings_invalid_profile() {
        let err = energy_savings(&json!({ "initial": "standby", "events": [] })).unwrap_err();
        assert!(err.is_invalid_profile());
        assert!(err.to_string().starts_with("Failed to calculate energy savings: "));
    }
}
