//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub appliance: ApplianceConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Config {
    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("appliance-usage");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults on first run.
    ///
    /// Returns the path of the file and whether it was just created, so the
    /// caller can report it once logging is up.
    pub fn load() -> Result<(Self, PathBuf, bool)> {
        let path = Self::config_path()?;
        let (config, created) = Self::load_or_init(&path)?;
        Ok((config, path, created))
    }

    /// Load configuration from `path`, writing defaults there if it does not exist.
    /// The flag is `true` when the defaults were written.
    pub fn load_or_init(path: &Path) -> Result<(Self, bool)> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok((config, true));
        }

        Ok((Self::load_from(path)?, false))
    }

    /// Load configuration from an explicit path. Never writes.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.general.output.as_str(), "text" | "json") {
            return Err(Error::Config(format!(
                "Unknown output format \"{}\" (expected \"text\" or \"json\")",
                self.general.output
            )));
        }
        if !self.appliance.rated_watts.is_finite() || self.appliance.rated_watts < 0.0 {
            return Err(Error::Config("appliance.rated_watts must be a non-negative number".to_string()));
        }
        if !self.pricing.rate_per_kwh.is_finite() || self.pricing.rate_per_kwh < 0.0 {
            return Err(Error::Config("pricing.rate_per_kwh must be a non-negative number".to_string()));
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default log filter: "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Report format: "text" or "json"
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_output() -> String { "text".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: default_output(),
        }
    }
}

/// The appliance the event log belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceConfig {
    #[serde(default = "default_appliance_name")]
    pub name: String,
    /// Rated power draw when on, in watts (0 = unknown, no energy estimate)
    #[serde(default)]
    pub rated_watts: f64,
}

fn default_appliance_name() -> String { "appliance".to_string() }

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            name: default_appliance_name(),
            rated_watts: 0.0,
        }
    }
}

/// Flat tariff used for cost estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency code (EUR, USD, GBP, etc.)
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_rate")]
    pub rate_per_kwh: f64,
}

fn default_currency() -> String { "EUR".to_string() }
fn default_currency_symbol() -> String { "\u{20AC}".to_string() } // Euro sign
fn default_rate() -> f64 { 0.2276 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
            rate_per_kwh: default_rate(),
        }
    }
}
