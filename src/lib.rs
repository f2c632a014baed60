//! Appliance usage library
//!
//! Computes how long an appliance was on, or how long its automatic
//! power-saving mode saved energy, from sparse and possibly noisy logs of
//! state changes. Timestamps are minutes from the start of the period
//! (daily profiles) or from the start of day 1 (yearly profiles).

pub mod core;
pub mod pricing;
pub mod sanitize;
pub mod savings;
pub mod services;
pub mod usage;

pub use crate::services::{energy_savings, usage_for_day, usage_for_year, usage_simple};
