//! Foothold - Entry Point
//!
//! Thin orchestration over the core pipeline:
//! load -> validate -> filter -> solve -> instantiate -> simulate -> report.
//! All domain logic lives in the library; this binary only sequences the
//! calls and formats the results.

use clap::Parser;
use foothold::catalog::dependencies::validate_dependencies;
use foothold::catalog::loader::load_catalog;
use foothold::core::config::Tuning;
use foothold::core::error::{FootholdError, Result};
use foothold::planning::compat::filter_compatible_modules;
use foothold::planning::solver::{estimate_parts, optimize_loadout, Loadout, SolveOutcome};
use foothold::simulation::engine::{run_simulation, SimulationReport};

use foothold::catalog::mission::Mission;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "foothold",
    about = "Habitat loadout planning and hour-by-hour survival simulation"
)]
struct Cli {
    /// Directory holding the module/agent/environment/mission catalogs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Mission id to evaluate (defaults to the first mission in the catalog)
    #[arg(long)]
    mission: Option<String>,

    /// List available missions and exit
    #[arg(long)]
    list_missions: bool,

    /// Emit the simulation report as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("foothold=info")
        .init();

    let cli = Cli::parse();

    let tuning = Tuning::default();
    tuning.validate().map_err(FootholdError::Catalog)?;

    let catalog = load_catalog(&cli.data_dir)?;

    let dependency_errors = validate_dependencies(&catalog.modules);
    if !dependency_errors.is_empty() {
        for error in &dependency_errors {
            tracing::error!("{error}");
        }
        return Err(FootholdError::Catalog(
            "module dependency validation failed".into(),
        ));
    }

    if cli.list_missions {
        println!("Available missions:");
        for mission in &catalog.missions {
            println!("  {:<20} {}", mission.id, mission.description);
        }
        return Ok(());
    }

    let mission = match &cli.mission {
        Some(id) => catalog
            .mission(id)
            .ok_or_else(|| FootholdError::MissionNotFound(id.clone()))?,
        None => catalog
            .missions
            .first()
            .ok_or_else(|| FootholdError::Catalog("catalog contains no missions".into()))?,
    };

    let environment = catalog
        .environment(&mission.environment)
        .ok_or_else(|| FootholdError::EnvironmentNotFound(mission.environment.clone()))?;

    if !cli.json {
        println!("=== FOOTHOLD ===");
        println!("Mission:     {} - {}", mission.id, mission.description);
        println!("Environment: {}", environment.name);
        println!();
    }

    let compat = filter_compatible_modules(&catalog.modules, environment);
    if !cli.json && !compat.rejected.is_empty() {
        println!("Rejected by physics checks:");
        for (name, reasons) in &compat.rejected {
            println!("  {name}");
            for reason in reasons {
                println!("    - {reason}");
            }
        }
        println!();
    }

    let loadout = match optimize_loadout(
        &compat.compatible,
        environment,
        mission,
        &catalog.agents,
        &tuning,
    )? {
        SolveOutcome::Optimal(loadout) => loadout,
        SolveOutcome::Infeasible => {
            if cli.json {
                println!("{}", infeasible_report()?);
            } else {
                println!("IMPOSSIBLE: No combination of modules can meet these goals.");
            }
            return Ok(());
        }
    };

    if !cli.json {
        print_loadout(&loadout);
        let parts = estimate_parts(&loadout, &compat.compatible, &tuning);
        println!(
            "Parts estimate: {:.0} kg structural, {:.1} electronic units",
            parts.structural_kg, parts.electronic_units
        );
        println!();
        println!("Running {}-hour simulation...", mission.duration_hours);
    }

    let instances = loadout.instantiate(&compat.compatible);
    let report = run_simulation(
        &instances,
        environment,
        loadout.colonists,
        loadout.robots,
        mission.duration_hours,
        &tuning,
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(mission, &report);
    Ok(())
}

/// Machine-readable stand-in for the simulation report when no loadout exists
fn infeasible_report() -> Result<String> {
    let value = serde_json::json!({
        "success": false,
        "infeasible": true,
        "message": "No combination of modules can meet these goals.",
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn print_loadout(loadout: &Loadout) {
    println!("Optimal loadout found:");
    println!("Modules:");
    for (name, count) in &loadout.modules {
        println!("   - {count} x {name}");
    }
    println!("Agents:");
    println!("   - {} x Humans", loadout.colonists);
    println!("   - {} x Robots", loadout.robots);
}

fn print_report(mission: &Mission, report: &SimulationReport) {
    for log in &report.logs {
        println!("   {log}");
    }
    println!();

    if report.success {
        println!("Colony survived {} hours.", report.hour);
    } else if let Some(reason) = &report.failure_reason {
        println!("MISSION FAILED at hour {}: {reason}", report.hour);
    }

    let outcomes = mission.evaluate(&report.resources);
    let all_goals_met = outcomes.iter().all(|o| o.met);

    if !outcomes.is_empty() {
        println!();
        println!("{:<20} | {:>10} | {:>10} | Status", "Requirement", "Target", "Actual");
        println!("{}", "-".repeat(56));
        for outcome in &outcomes {
            println!(
                "{:<20} | {:>10} | {:>10} | {}",
                outcome.requirement,
                outcome.target,
                outcome.actual,
                if outcome.met { "MET" } else { "FAILED" }
            );
        }
    }

    println!();
    println!("{}", "=".repeat(42));
    if report.success && all_goals_met {
        println!("MISSION ACCOMPLISHED");
        for (resource, value) in &report.resources {
            println!("   > {resource}: {value}");
        }
    } else {
        println!("MISSION FAILED");
        if !report.success {
            println!("Cause: Structural collapse / resource depletion.");
        } else {
            println!("Cause: Stockpiles below required threshold for foothold.");
        }
    }
    println!("{}", "=".repeat(42));
}
