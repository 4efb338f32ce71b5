//! Discrete-time simulation engine - exact hourly replay of a loadout
//!
//! The solver works on a time-aggregated linear model; this engine replays
//! the same loadout under exact per-hour dynamics (half-sinusoid solar
//! cycle, battery ceilings, tag-gated activation) to catch what the linear
//! approximation cannot represent. Some disagreement between the two layers
//! is expected and normal; the engine's verdict is authoritative.

use crate::catalog::environment::Environment;
use crate::catalog::module::Module;
use crate::catalog::resource::Resource;
use crate::core::config::Tuning;
use crate::simulation::ledger::Ledger;
use ahash::AHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Daylight curve: zero through the night half of the cycle, a half-sinusoid
/// peaking at 1.0 at hour 6 through the day half
pub fn solar_multiplier(hour: u32) -> f64 {
    let hour_of_day = hour % 24;
    if hour_of_day >= 12 {
        return 0.0;
    }
    (std::f64::consts::PI * f64::from(hour_of_day) / 12.0).sin()
}

/// Result record of one simulation run - always well-formed, even on failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub success: bool,
    /// Hour the run ended: the failing hour, or the full duration
    pub hour: u32,
    /// Final ledger state
    pub resources: BTreeMap<Resource, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Ledger snapshots taken every 12th hour
    pub logs: Vec<String>,
}

/// Replay one instantiated loadout hour-by-hour
///
/// `instances` is the loadout with counts expanded into individual module
/// copies. Pure and deterministic: identical inputs produce byte-identical
/// reports.
pub fn run_simulation(
    instances: &[Module],
    environment: &Environment,
    colonists: u32,
    robots: u32,
    duration_hours: u32,
    tuning: &Tuning,
) -> SimulationReport {
    let mut ledger = Ledger::new(&environment.initial_resources);
    let mut logs = Vec::new();

    // Labor balance is fixed for the whole run: demand from every instance
    // present, supply from the crew. Seeded into the ledger for visibility,
    // but checked separately so a shortfall names its own failure.
    let labor_demand: f64 = instances.iter().map(|m| tuning.labor_coefficient(m)).sum();
    let labor_balance = tuning.labor_supply(colonists, robots) - labor_demand;
    ledger.set(Resource::Labour, labor_balance);

    // Provided tags count while a module is merely present, not while it is
    // active. Presence is static, so the tag set and with it the active set
    // are fixed before the first hour.
    let active_tags: AHashSet<&str> = environment
        .tags
        .iter()
        .map(String::as_str)
        .chain(
            instances
                .iter()
                .flat_map(|m| m.provides_tags.iter().map(String::as_str)),
        )
        .collect();

    let active: Vec<&Module> = instances
        .iter()
        .filter(|m| {
            m.requires_env_tags
                .iter()
                .all(|tag| active_tags.contains(tag.as_str()))
        })
        .collect();

    if active.len() < instances.len() {
        tracing::debug!(
            inactive = instances.len() - active.len(),
            "instances idle for lack of required tags"
        );
    }

    for hour in 0..=duration_hours {
        let solar = solar_multiplier(hour);

        // Power is use-it-or-lose-it: inputs accumulate into a demand total
        // and settle against generation below. Everything else debits the
        // ledger immediately.
        let mut total_power_demand = 0.0;
        for module in &active {
            for (resource, rate) in &module.inputs {
                match resource {
                    Resource::Power => total_power_demand += rate,
                    Resource::SolarExposure => {}
                    _ => ledger.debit(resource, *rate),
                }
            }
        }

        let mut total_power_generation = 0.0;
        let mut max_battery_capacity = 0.0;
        for module in &active {
            for (resource, rate) in &module.outputs {
                match resource {
                    Resource::Power => {
                        total_power_generation +=
                            if module.is_solar() { rate * solar } else { *rate };
                    }
                    // A storage ceiling, never stock
                    Resource::Capacity => max_battery_capacity += rate,
                    // Rate limit, unmodeled; slots are not stockpiled
                    Resource::DischargeOut | Resource::HabitatSpace => {}
                    _ => ledger.credit(resource, *rate),
                }
            }
        }

        let net_power_flow = total_power_generation - total_power_demand;
        let stored = (ledger.get(&Resource::Power) + net_power_flow)
            .clamp(0.0, max_battery_capacity);
        ledger.set(Resource::Power, stored);

        if let Some((resource, _)) = ledger.first_negative_except(&Resource::Labour) {
            let reason = format!("CRITICAL FAILURE: {resource} exhausted at hour {hour}.");
            return fail(hour, reason, ledger, logs);
        }

        if ledger.get(&Resource::Power) <= 0.0 && net_power_flow < 0.0 {
            let reason = "CRITICAL FAILURE: Power grid collapse at night.".to_string();
            return fail(hour, reason, ledger, logs);
        }

        if labor_balance < 0.0 {
            let reason =
                "CRITICAL FAILURE: Labour needed exceeded labour provided.".to_string();
            return fail(hour, reason, ledger, logs);
        }

        if hour % 12 == 0 {
            logs.push(format!(
                "Hour {:03} | Solar: {:.2} | {}",
                hour,
                solar,
                ledger.snapshot()
            ));
        }
    }

    SimulationReport {
        success: true,
        hour: duration_hours,
        resources: ledger.into_map(),
        failure_reason: None,
        logs,
    }
}

fn fail(hour: u32, reason: String, ledger: Ledger, logs: Vec<String>) -> SimulationReport {
    tracing::debug!(hour, %reason, "simulation failed");
    SimulationReport {
        success: false,
        hour,
        resources: ledger.into_map(),
        failure_reason: Some(reason),
        logs,
    }
}
