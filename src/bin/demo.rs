//! Appliance usage - Demo CLI
//!
//! Walks through the calculator on a few reference profiles: a single day,
//! a slice of a yearly log, a full-year breakdown, and auto-off savings.

use appliance_usage_lib::core::{ApplianceConfig, PricingConfig, MAX_IN_PERIOD};
use appliance_usage_lib::pricing::EnergyEstimator;
use appliance_usage_lib::services;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   Appliance Usage - Demo CLI");
    println!("==============================================\n");

    let appliance = ApplianceConfig {
        name: "kettle".to_string(),
        rated_watts: 2000.0,
    };
    let pricing = PricingConfig::default();
    let estimator = EnergyEstimator::new(&appliance, &pricing);
    println!(
        "Appliance: {} at {:.0} W, rate {:.4} {}/kWh\n",
        appliance.name,
        appliance.rated_watts,
        pricing.rate_per_kwh,
        estimator.get_currency_symbol()
    );

    // 1. Single day, including junk entries that get dropped
    println!("[1/4] Single day...");
    let day_profile = json!({
        "initial": "on",
        "events": [
            { "timestamp": 833, "state": "on" },
            null,
            { "timestamp": 126, "state": "off" },
            { "timestamp": "noon", "state": "off" },
            { "timestamp": 2000, "state": "off" },
        ],
    });
    let minutes = services::usage_simple(&day_profile)?;
    let estimate = estimator.estimate(u64::from(minutes));
    println!("      On:   {} of {} min", minutes, MAX_IN_PERIOD);
    println!("      Cost: {:.3} kWh, {:.2} {}\n", estimate.kwh, estimate.cost, estimator.get_currency_symbol());

    // 2. One day of a yearly log
    println!("[2/4] Day slice of a yearly log...");
    let year_profile = json!({
        "initial": "off",
        "events": [
            { "timestamp": 4500, "state": "on" },
            { "timestamp": 20000, "state": "off" },
        ],
    });
    for day in [2, 4, 10, 14, 15] {
        println!("      Day {:>2}: {:>4} min on", day, services::usage_for_day(&year_profile, day)?);
    }
    println!();

    // 3. Whole year
    println!("[3/4] Whole year...");
    let year = services::usage_for_year(&year_profile)?;
    let estimate = estimator.estimate(year.total_minutes);
    println!("      Active days: {}", year.active_days());
    println!("      Total:       {} min", year.total_minutes);
    println!("      Cost:        {:.3} kWh, {:.2} {}\n", estimate.kwh, estimate.cost, estimator.get_currency_symbol());

    // 4. Auto-off savings
    println!("[4/4] Auto-off savings...");
    let saver_profile = json!({
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
    let saved = services::energy_savings(&saver_profile)?;
    let estimate = estimator.estimate(u64::from(saved));
    println!("      Saved: {} min", saved);
    println!("      Worth: {:.3} kWh, {:.2} {}\n", estimate.kwh, estimate.cost, estimator.get_currency_symbol());

    // Rejected input
    println!("=== Validation ===\n");
    if let Err(e) = services::usage_for_day(&year_profile, 366) {
        println!("  {}", e);
    }
    if let Err(e) = services::usage_simple(&json!({ "initial": "standby", "events": [] })) {
        println!("  {}", e);
    }

    println!("\n==============================================");
    Ok(())
}
