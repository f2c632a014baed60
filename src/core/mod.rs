//! Core module - Configuration, errors, and the shared event model

mod config;
mod error;
mod types;

pub use config::{ApplianceConfig, Config, GeneralConfig, PricingConfig};
pub use error::{DayError, Error, Result};
pub use types::{
    ApplianceState, Day, Event, Minutes, PowerState, Profile, SaverState, Timestamp,
    DAYS_IN_YEAR, MAX_IN_PERIOD,
};
