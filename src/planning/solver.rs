//! Loadout optimization - one MILP per invocation
//!
//! Objective: minimize the total unit count (modules plus crew), a
//! footprint proxy. The objective carries no tie-breaking term, so multiple
//! equal-cost optimal loadouts may exist and different solver versions may
//! return different ones; any optimum is accepted.

use crate::catalog::agent::{humans_present, Agent};
use crate::catalog::environment::Environment;
use crate::catalog::mission::Mission;
use crate::catalog::module::Module;
use crate::core::config::Tuning;
use crate::core::error::{FootholdError, Result};
use crate::planning::constraints::{
    housing_constraint, labor_constraint, module_floor_constraint, nighttime_power_constraint,
    storage_resilience_constraint, sustainment_constraints, LoadoutVars,
};
use ahash::AHashMap;
use good_lp::{default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable};
use serde::Serialize;
use std::collections::BTreeMap;

/// A solved loadout: module counts plus crew composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loadout {
    /// Module name -> chosen count; zero-count modules are omitted
    pub modules: BTreeMap<String, u32>,
    pub colonists: u32,
    pub robots: u32,
}

impl Loadout {
    /// Total units chosen, the value the objective minimized
    pub fn total_units(&self) -> u32 {
        self.modules.values().sum::<u32>() + self.colonists + self.robots
    }

    /// Expand counts into individual module instances for the simulation
    ///
    /// Names absent from the catalog slice are skipped; the solver only
    /// emits names it was given, so that path is unreachable in practice.
    pub fn instantiate(&self, catalog: &[Module]) -> Vec<Module> {
        let index: AHashMap<&str, &Module> =
            catalog.iter().map(|m| (m.name.as_str(), m)).collect();

        let mut instances = Vec::new();
        for (name, count) in &self.modules {
            if let Some(module) = index.get(name.as_str()) {
                for _ in 0..*count {
                    instances.push((*module).clone());
                }
            }
        }
        instances
    }
}

/// Result of one solve: an optimal loadout or a defined "no solution"
///
/// Infeasibility is an outcome, not an error; the caller must halt the
/// pipeline since simulation requires a loadout.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Optimal(Loadout),
    Infeasible,
}

/// Build and solve the loadout MILP for one mission
///
/// `valid_modules` is the compatibility filter's output; an empty candidate
/// set simply propagates to infeasibility through the constraints.
pub fn optimize_loadout(
    valid_modules: &[Module],
    environment: &Environment,
    mission: &Mission,
    agents: &[Agent],
    tuning: &Tuning,
) -> Result<SolveOutcome> {
    let mut problem = variables!();

    let module_vars: Vec<(&Module, Variable)> = valid_modules
        .iter()
        .map(|module| (module, problem.add(variable().integer().min(0))))
        .collect();

    // Crewed housing: a roster with humans forces at least one colonist
    let colonist_floor = if humans_present(agents) { 1 } else { 0 };
    let colonists = problem.add(variable().integer().min(colonist_floor));
    let robots = problem.add(variable().integer().min(0));

    let vars = LoadoutVars {
        modules: module_vars,
        colonists,
        robots,
    };

    let objective: Expression = vars
        .modules
        .iter()
        .map(|(_, var)| Expression::from(*var))
        .sum::<Expression>()
        + colonists
        + robots;

    let mut model = problem.minimise(objective).using(default_solver);

    model = model.with(labor_constraint(&vars, tuning));
    model = model.with(nighttime_power_constraint(&vars, agents));
    if let Some(c) = storage_resilience_constraint(&vars, mission) {
        model = model.with(c);
    }
    if let Some(c) = housing_constraint(&vars, agents) {
        model = model.with(c);
    }
    for c in sustainment_constraints(&vars, environment, mission, agents, tuning) {
        model = model.with(c);
    }
    if let Some(c) = module_floor_constraint(&vars, mission) {
        model = model.with(c);
    }

    match model.solve() {
        Ok(solution) => {
            let mut modules = BTreeMap::new();
            for (module, var) in &vars.modules {
                // Round defensively against numeric slack in the solution
                let count = round_count(solution.value(*var));
                if count > 0 {
                    modules.insert(module.name.clone(), count);
                }
            }

            let loadout = Loadout {
                modules,
                colonists: round_count(solution.value(colonists)),
                robots: round_count(solution.value(robots)),
            };
            tracing::info!(
                mission = %mission.id,
                units = loadout.total_units(),
                colonists = loadout.colonists,
                robots = loadout.robots,
                "optimal loadout found"
            );
            Ok(SolveOutcome::Optimal(loadout))
        }
        Err(ResolutionError::Infeasible) => {
            tracing::info!(mission = %mission.id, "no feasible loadout");
            Ok(SolveOutcome::Infeasible)
        }
        Err(other) => Err(FootholdError::Solver(other.to_string())),
    }
}

fn round_count(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Structural and electronic parts estimate for a loadout, display only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartsEstimate {
    pub structural_kg: f64,
    pub electronic_units: f64,
}

/// Estimate the parts bill for assembling every chosen unit
pub fn estimate_parts(loadout: &Loadout, catalog: &[Module], tuning: &Tuning) -> PartsEstimate {
    let mut estimate = PartsEstimate {
        structural_kg: 0.0,
        electronic_units: 0.0,
    };

    for module in catalog {
        if let Some(count) = loadout.modules.get(&module.name) {
            let count = f64::from(*count);
            estimate.structural_kg += count * tuning.structural_parts(module);
            estimate.electronic_units += count * tuning.electronic_parts(module);
        }
    }
    estimate
}
