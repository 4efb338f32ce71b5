//! Linear constraints over one solve's decision variables
//!
//! Each function encodes one physical rule as inequalities over the module
//! count, colonist and robot variables. All coefficients come from the
//! shared tuning tables, so the solver and the simulation engine agree on
//! what a loadout costs to run.

use crate::catalog::agent::{category_drain, Agent, AgentCategory};
use crate::catalog::environment::Environment;
use crate::catalog::mission::Mission;
use crate::catalog::module::{Module, PRESSURIZED_TAG};
use crate::catalog::resource::Resource;
use crate::core::config::Tuning;
use good_lp::{constraint, Constraint, Expression, Variable};

/// Decision variables owned by one solver invocation
pub(crate) struct LoadoutVars<'a> {
    /// One non-negative integer count per candidate module
    pub modules: Vec<(&'a Module, Variable)>,
    pub colonists: Variable,
    pub robots: Variable,
}

/// Labor balance: chosen modules must be maintainable by the chosen crew
pub(crate) fn labor_constraint(vars: &LoadoutVars, tuning: &Tuning) -> Constraint {
    let needed: Expression = vars
        .modules
        .iter()
        .map(|(module, var)| *var * tuning.labor_coefficient(module))
        .sum();

    let supply = vars.colonists * tuning.human_labor_hours + vars.robots * tuning.robot_labor_hours;
    constraint!(supply >= needed)
}

/// Worst-case nighttime power balance, hour-independent
///
/// Solar contributes nothing at night, so steady generation plus battery
/// discharge capability must cover the hourly drain on its own. Battery
/// `charge_in` doubles as the discharge capability here.
pub(crate) fn nighttime_power_constraint(vars: &LoadoutVars, agents: &[Agent]) -> Constraint {
    let base_load: Expression = vars
        .modules
        .iter()
        .map(|(module, var)| *var * module.input(&Resource::Power))
        .sum();

    let steady: Expression = vars
        .modules
        .iter()
        .filter(|(module, _)| {
            !module.is_solar() && !module.is_battery() && module.output(&Resource::Power) > 0.0
        })
        .map(|(module, var)| *var * module.output(&Resource::Power))
        .sum();

    let discharge: Expression = vars
        .modules
        .iter()
        .filter(|(module, _)| module.is_battery())
        .map(|(module, var)| *var * module.output(&Resource::ChargeIn))
        .sum();

    let human_draw = category_drain(agents, AgentCategory::Human, &Resource::Power);
    let robot_draw = category_drain(agents, AgentCategory::Robotic, &Resource::Power);
    let crew_draw = vars.colonists * human_draw + vars.robots * robot_draw;

    constraint!(steady + discharge >= base_load + crew_draw)
}

/// Force battery capacity up to the mission's power-resilience target
pub(crate) fn storage_resilience_constraint(
    vars: &LoadoutVars,
    mission: &Mission,
) -> Option<Constraint> {
    let target = mission.requirement_minimum("power");
    if target <= 0.0 {
        return None;
    }

    let capacity: Expression = vars
        .modules
        .iter()
        .filter(|(module, _)| module.is_battery())
        .map(|(module, var)| *var * module.output(&Resource::Capacity))
        .sum();

    Some(constraint!(capacity >= target))
}

/// Habitat pressurization linkage
///
/// Every module requiring a pressurized environment and every human needs a
/// provided habitat-space slot. Skipped entirely when nothing can consume a
/// slot.
pub(crate) fn housing_constraint(vars: &LoadoutVars, agents: &[Agent]) -> Option<Constraint> {
    let consumers: Vec<Variable> = vars
        .modules
        .iter()
        .filter(|(module, _)| module.is_internal())
        .map(|(_, var)| *var)
        .collect();

    let humans = crate::catalog::agent::humans_present(agents);
    if consumers.is_empty() && !humans {
        return None;
    }

    let provided: Expression = vars
        .modules
        .iter()
        .filter(|(module, _)| module.provides(PRESSURIZED_TAG))
        .map(|(module, var)| *var * module.output(&Resource::HabitatSpace))
        .sum();

    let needed: Expression =
        consumers.into_iter().map(Expression::from).sum::<Expression>() + vars.colonists;

    Some(constraint!(provided >= needed))
}

/// General resource sustainment over the mission duration, one constraint
/// per tracked resource
///
/// Initial stock plus aggregated net flow minus crew upkeep must reach the
/// mission minimum. Solar power output is derated by the day-averaged
/// capacity factor; the simulation replays the exact sinusoid later.
pub(crate) fn sustainment_constraints(
    vars: &LoadoutVars,
    environment: &Environment,
    mission: &Mission,
    agents: &[Agent],
    tuning: &Tuning,
) -> Vec<Constraint> {
    let duration = f64::from(mission.duration_hours);

    Resource::TRACKED
        .iter()
        .map(|resource| {
            let initial = environment
                .initial_resources
                .get(resource)
                .copied()
                .unwrap_or(0.0);
            let target = mission.requirement_minimum(resource.as_str());

            let human_drain = category_drain(agents, AgentCategory::Human, resource);
            let robot_drain = category_drain(agents, AgentCategory::Robotic, resource);
            let upkeep: Expression = vars.colonists * (human_drain * duration)
                + vars.robots * (robot_drain * duration);

            let net_flow: Expression = vars
                .modules
                .iter()
                .map(|(module, var)| {
                    let raw_out = module.output(resource);
                    let effective_out = if *resource == Resource::Power && module.is_solar() {
                        raw_out * tuning.solar_capacity_factor
                    } else {
                        raw_out
                    };
                    *var * ((effective_out - module.input(resource)) * duration)
                })
                .sum();

            constraint!(net_flow - upkeep >= target - initial)
        })
        .collect()
}

/// Direct lower bound on one module's count, when the mission pins it
///
/// Pinning a module the filter rejected adds nothing: the mission is asking
/// for hardware that cannot survive the site, and the sustainment targets
/// it was meant to serve still apply.
pub(crate) fn module_floor_constraint(vars: &LoadoutVars, mission: &Mission) -> Option<Constraint> {
    let requirement = mission.module_num.as_ref()?;
    let name = requirement.metric.replace(' ', "_");

    let (_, var) = vars.modules.iter().find(|(module, _)| module.name == name)?;
    Some(constraint!(*var >= f64::from(requirement.minimum)))
}
