//! Appliance usage - command line entry point
//!
//! Reads a JSON usage profile from a file or stdin and reports minutes on,
//! minutes saved by auto-off, or a per-day breakdown for a whole year.

use anyhow::{Context, Result};
use appliance_usage_lib::core::{Config, Minutes, MAX_IN_PERIOD};
use appliance_usage_lib::pricing::{EnergyEstimate, EnergyEstimator};
use appliance_usage_lib::services;
use appliance_usage_lib::usage::off_minutes;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "appliance-usage", version, about = "Appliance on-time and auto-off savings calculator")]
struct Cli {
    /// Configuration file (default: <config dir>/appliance-usage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON regardless of the configured output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Minutes on during a single-day profile
    Usage {
        /// Profile JSON file, `-` or absent for stdin
        profile: Option<PathBuf>,
    },
    /// Minutes on during one day (1-365) of a yearly profile
    Day {
        #[arg(allow_hyphen_values = true)]
        day: String,
        /// Profile JSON file, `-` or absent for stdin
        profile: Option<PathBuf>,
    },
    /// Minutes on for every day of a yearly profile
    Year {
        /// Profile JSON file, `-` or absent for stdin
        profile: Option<PathBuf>,
    },
    /// Minutes saved by auto-off during a single-day profile
    Savings {
        /// Profile JSON file, `-` or absent for stdin
        profile: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, written, config_error) = match &cli.config {
        Some(path) => (
            Config::load_from(path).with_context(|| format!("Loading config {}", path.display()))?,
            None,
            None,
        ),
        None => match Config::load() {
            Ok((config, path, created)) => (config, created.then_some(path), None),
            Err(e) => (Config::default(), None, Some(e)),
        },
    };

    // Config notices wait until the logger is up
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.general.log_level)).init();

    if let Some(path) = written {
        log::info!("Wrote default configuration to {}", path.display());
    }
    if let Some(e) = config_error {
        log::warn!("Using default configuration: {}", e);
    }

    let as_json = cli.json || config.general.output == "json";
    let estimator = EnergyEstimator::from_config(&config);

    let report = match &cli.command {
        Command::Usage { profile } => {
            let minutes = services::usage_simple(&read_profile(profile.as_deref())?)?;
            day_report("usage", minutes, &estimator)
        }
        Command::Day { day, profile } => {
            // Keep the raw text when it is not JSON so the day check reports it
            let day_value: Value =
                serde_json::from_str(day.trim()).unwrap_or_else(|_| Value::String(day.clone()));
            let minutes = services::usage_for_day(&read_profile(profile.as_deref())?, day_value)?;
            let mut report = day_report("usage", minutes, &estimator);
            report["day"] = json!(day.trim());
            report
        }
        Command::Year { profile } => {
            let year = services::usage_for_year(&read_profile(profile.as_deref())?)?;
            json!({
                "operation": "year",
                "days": year.days,
                "total_minutes": year.total_minutes,
                "active_days": year.active_days(),
                "estimate": estimate_json(&estimator, year.total_minutes),
            })
        }
        Command::Savings { profile } => {
            let minutes = services::energy_savings(&read_profile(profile.as_deref())?)?;
            json!({
                "operation": "savings",
                "minutes": minutes,
                "estimate": estimate_json(&estimator, u64::from(minutes)),
            })
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&config, &estimator, &report);
    }

    Ok(())
}

fn read_profile(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("Reading profile {}", path.display()))?
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Reading profile from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Profile is not valid JSON")
}

fn day_report(operation: &str, minutes: Minutes, estimator: &EnergyEstimator) -> Value {
    json!({
        "operation": operation,
        "minutes": minutes,
        "off_minutes": off_minutes(minutes),
        "estimate": estimate_json(estimator, u64::from(minutes)),
    })
}

fn estimate_json(estimator: &EnergyEstimator, minutes: u64) -> Value {
    if estimator.is_configured() {
        json!(estimator.estimate(minutes))
    } else {
        Value::Null
    }
}

fn print_text(config: &Config, estimator: &EnergyEstimator, report: &Value) {
    let name = &config.appliance.name;
    let minutes = report["minutes"].as_u64().unwrap_or(0);

    match report["operation"].as_str() {
        Some("savings") => {
            println!("{}: {} saved by auto-off", name, format_minutes(minutes));
        }
        Some("year") => {
            let total = report["total_minutes"].as_u64().unwrap_or(0);
            println!(
                "{}: {} on over the year, {} active days",
                name,
                format_minutes(total),
                report["active_days"]
            );
            if let Some(days) = report["days"].as_array() {
                for (index, day) in days.iter().enumerate() {
                    let on = day.as_u64().unwrap_or(0);
                    if on > 0 {
                        println!("  day {:>3}: {:>4} min", index + 1, on);
                    }
                }
            }
        }
        _ => {
            let label = match report["day"].as_str() {
                Some(day) => format!("{} (day {})", name, day),
                None => name.clone(),
            };
            println!(
                "{}: {} on, {} off (of {} min)",
                label,
                format_minutes(minutes),
                format_minutes(report["off_minutes"].as_u64().unwrap_or(0)),
                MAX_IN_PERIOD
            );
        }
    }

    if let Ok(estimate) = serde_json::from_value::<EnergyEstimate>(report["estimate"].clone()) {
        println!(
            "  {:.3} kWh, {:.2} {}",
            estimate.kwh,
            estimate.cost,
            estimator.get_currency_symbol()
        );
    }
}

fn format_minutes(minutes: u64) -> String {
    format!("{} min ({}h {:02}m)", minutes, minutes / 60, minutes % 60)
}
