//! Common types used across the calculator

use crate::core::{DayError, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Number of indivisible time units (minutes) in one period (a day)
pub const MAX_IN_PERIOD: Minutes = 1440;

/// Number of periods in a yearly profile
pub const DAYS_IN_YEAR: u32 = 365;

/// A duration inside one period, always within `0..=MAX_IN_PERIOD`
pub type Minutes = u32;

/// Offset from the start of a period (daily) or of day 1 (yearly)
pub type Timestamp = u64;

/// A power-state domain.
///
/// Each domain fixes the set of states a sanitizer accepts. Wire spelling
/// is the lowercase kebab-case name returned by [`ApplianceState::as_str`].
pub trait ApplianceState: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every state of this domain
    const ACCEPTED: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Whether the appliance draws power in this state
    fn is_on(&self) -> bool;

    /// Parse the wire spelling, `None` for anything outside the domain
    fn parse(name: &str) -> Option<Self> {
        Self::ACCEPTED.iter().copied().find(|state| state.as_str() == name)
    }

    /// Human readable list of the accepted spellings, used in error messages
    fn accepted_list() -> String {
        Self::ACCEPTED
            .iter()
            .map(|state| format!("\"{}\"", state.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Two-state domain used for usage calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerState {
    On,
    Off,
}

impl ApplianceState for PowerState {
    const ACCEPTED: &'static [Self] = &[PowerState::On, PowerState::Off];

    fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }

    fn is_on(&self) -> bool {
        matches!(self, PowerState::On)
    }
}

/// Three-state domain used for energy savings calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaverState {
    On,
    Off,
    AutoOff,
}

impl ApplianceState for SaverState {
    const ACCEPTED: &'static [Self] = &[SaverState::On, SaverState::Off, SaverState::AutoOff];

    fn as_str(&self) -> &'static str {
        match self {
            SaverState::On => "on",
            SaverState::Off => "off",
            SaverState::AutoOff => "auto-off",
        }
    }

    fn is_on(&self) -> bool {
        matches!(self, SaverState::On)
    }
}

impl From<PowerState> for SaverState {
    fn from(state: PowerState) -> Self {
        match state {
            PowerState::On => SaverState::On,
            PowerState::Off => SaverState::Off,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SaverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<S> {
    pub timestamp: Timestamp,
    pub state: S,
}

impl<S: ApplianceState> Event<S> {
    pub fn new(timestamp: Timestamp, state: S) -> Self {
        Self { timestamp, state }
    }

    /// Read a raw telemetry entry.
    ///
    /// Returns `None` unless the entry is an object with a finite,
    /// non-negative `timestamp` and a `state` from this domain. Fractional
    /// timestamps are floored to the whole minute. Range checks
    /// against the period are left to the sanitizer.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let timestamp = entry.get("timestamp").and_then(timestamp_of)?;
        let state = entry.get("state").and_then(Value::as_str).and_then(S::parse)?;
        Some(Self { timestamp, state })
    }
}

impl<S: ApplianceState> From<Event<S>> for Value {
    fn from(event: Event<S>) -> Self {
        json!({ "timestamp": event.timestamp, "state": event.state.as_str() })
    }
}

fn timestamp_of(value: &Value) -> Option<Timestamp> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(timestamp) = number.as_u64() {
        return Some(timestamp);
    }
    // Fractional minutes fall into the minute they started in
    let float = number.as_f64()?;
    if float.is_finite() && float >= 0.0 && float <= u64::MAX as f64 {
        Some(float.floor() as Timestamp)
    } else {
        None
    }
}

/// Initial state plus the raw, not yet sanitized event entries
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<S> {
    pub initial: S,
    pub events: Vec<Value>,
}

impl<S: ApplianceState> Profile<S> {
    /// Build a profile from already typed events
    pub fn new(initial: S, events: impl IntoIterator<Item = Event<S>>) -> Self {
        Self {
            initial,
            events: events.into_iter().map(Value::from).collect(),
        }
    }

    /// Structural gate for profiles received as JSON.
    ///
    /// Fails when the profile is missing, `initial` is not a state of this
    /// domain, or `events` is not an array. Individual entries are not
    /// inspected here.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Err(Error::InvalidProfile("profile is missing".to_string())),
            _ => {
                return Err(Error::InvalidProfile(
                    "profile must be an object with an initial state and an events array".to_string(),
                ))
            }
        };

        let initial = object
            .get("initial")
            .and_then(Value::as_str)
            .and_then(S::parse)
            .ok_or_else(|| {
                Error::InvalidProfile(format!(
                    "initial state must be one of {}",
                    S::accepted_list()
                ))
            })?;

        let events = object
            .get("events")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                Error::InvalidProfile("events must be an array of state change events".to_string())
            })?;

        Ok(Self { initial, events })
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("initial".to_string(), Value::from(self.initial.as_str()));
        object.insert("events".to_string(), Value::Array(self.events.clone()));
        Value::Object(object)
    }
}

/// A 1-indexed day of the year, always within `1..=DAYS_IN_YEAR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Day(u32);

impl Day {
    pub fn new(day: i64) -> std::result::Result<Self, DayError> {
        if !(1..=i64::from(DAYS_IN_YEAR)).contains(&day) {
            return Err(DayError::OutOfRange(day));
        }
        Ok(Self(day as u32))
    }

    /// Read a day selector from JSON. Only whole numbers qualify.
    pub fn from_value(value: &Value) -> std::result::Result<Self, DayError> {
        let Value::Number(number) = value else {
            return Err(DayError::NotAnInteger);
        };
        if let Some(day) = number.as_i64() {
            return Self::new(day);
        }
        match number.as_f64() {
            Some(float) if float.is_finite() && float.fract() == 0.0 => {
                Self::new(float.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
            }
            _ => Err(DayError::NotAnInteger),
        }
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// First yearly timestamp belonging to this day
    pub fn start(&self) -> Timestamp {
        Timestamp::from(self.0 - 1) * Timestamp::from(MAX_IN_PERIOD)
    }

    /// First yearly timestamp after this day
    pub fn end(&self) -> Timestamp {
        self.start() + Timestamp::from(MAX_IN_PERIOD)
    }

    /// Every day of the year, in order
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=DAYS_IN_YEAR).map(Day)
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s.trim()).map_err(|_| DayError::NotAnInteger)?;
        Self::from_value(&value)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
