//! Energy and cost estimates for computed durations
//!
//! Turns minutes on (or minutes saved) into kWh using the appliance's rated
//! power, then into cost at a flat rate per kWh.

use crate::core::{ApplianceConfig, Config, PricingConfig};
use serde::{Deserialize, Serialize};

/// Energy and cost for a duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub minutes: u64,
    pub kwh: f64,
    pub cost: f64,
    pub currency: String,
}

/// Estimator for one appliance at one tariff
pub struct EnergyEstimator {
    rated_watts: f64,
    pricing: PricingConfig,
}

impl EnergyEstimator {
    pub fn new(appliance: &ApplianceConfig, pricing: &PricingConfig) -> Self {
        Self {
            rated_watts: appliance.rated_watts,
            pricing: pricing.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.appliance, &config.pricing)
    }

    /// Whether the appliance power is known. Without it every estimate is zero.
    pub fn is_configured(&self) -> bool {
        self.rated_watts > 0.0
    }

    /// Energy drawn by running at rated power for `minutes`
    pub fn calculate_kwh(&self, minutes: u64) -> f64 {
        let hours = minutes as f64 / 60.0;
        self.rated_watts * hours / 1000.0
    }

    /// Calculate cost for a given energy consumption in kWh
    pub fn calculate_cost(&self, kwh: f64) -> f64 {
        kwh * self.pricing.rate_per_kwh
    }

    pub fn estimate(&self, minutes: u64) -> EnergyEstimate {
        let kwh = self.calculate_kwh(minutes);
        EnergyEstimate {
            minutes,
            kwh,
            cost: self.calculate_cost(kwh),
            currency: self.pricing.currency.clone(),
        }
    }

    /// Get the currency symbol
    pub fn get_currency_symbol(&self) -> &str {
        &self.pricing.currency_symbol
    }
}
