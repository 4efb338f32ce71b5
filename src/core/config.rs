//! Planner and engine tuning with documented constants
//!
//! All tier lookup tables and magic numbers are collected here. A `Tuning`
//! value is passed by reference into the constraint builder and the
//! simulation engine, so concurrent runs can carry different tuning.

use crate::catalog::module::{ComplexityTier, MassTier, Module};

/// Tuning constants shared by the solver and the simulation engine
///
/// The labor coefficient computed from this table is the single authority
/// for both the solver's labor constraint and the simulator's hourly labor
/// check. The two layers cannot disagree on feasibility as long as both go
/// through [`Tuning::labor_coefficient`].
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Scalar per mass tier, indexed micro -> massive
    ///
    /// Approximates structural bulk without per-module bespoke values.
    /// Drives the structural parts estimate shown in loadout reports.
    pub mass_scalars: [f64; 5],

    /// Scalar per complexity tier, indexed very_low -> ultra
    ///
    /// Complex modules demand disproportionately more upkeep labor; the
    /// same scalar also drives the electronic parts estimate.
    pub complexity_scalars: [f64; 5],

    /// Base multiplier applied to every module's labor requirement
    ///
    /// Kept at 1.0 by default; raising it makes every loadout more
    /// crew-hungry without touching individual catalog entries.
    pub labor_base: f64,

    /// Labor-hours one colonist supplies per day
    pub human_labor_hours: f64,

    /// Labor-hours one robot supplies per day (robots work around the clock)
    pub robot_labor_hours: f64,

    /// Day-averaged derating factor for solar power in the linear model
    ///
    /// The integral of the half-sinusoid daylight curve over 24 hours
    /// averages to ~31.8% of peak output. The solver uses this flat factor
    /// in its time-aggregated constraints; the simulation engine replays
    /// the instantaneous sinusoid instead. The gap between the two is an
    /// intentional two-phase design: cheap linear approximation first,
    /// exact replay for validation after.
    pub solar_capacity_factor: f64,

    /// Base weight (kg) behind the structural parts estimate
    pub parts_base_weight: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // micro, small, standard, heavy, massive
            mass_scalars: [0.1, 0.5, 1.0, 2.5, 10.0],
            // very_low, low, medium, high, ultra
            complexity_scalars: [0.5, 1.0, 2.5, 5.0, 10.0],

            labor_base: 1.0,
            human_labor_hours: 8.0,
            robot_labor_hours: 24.0,

            solar_capacity_factor: 0.318,
            parts_base_weight: 500.0,
        }
    }
}

impl Tuning {
    /// Create a new tuning with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Scalar for a mass tier
    pub fn mass_scalar(&self, tier: MassTier) -> f64 {
        self.mass_scalars[tier as usize]
    }

    /// Scalar for a complexity tier
    pub fn complexity_scalar(&self, tier: ComplexityTier) -> f64 {
        self.complexity_scalars[tier as usize]
    }

    /// Labor-hours per day one unit of this module demands
    ///
    /// Shared by the solver's labor constraint and the engine's labor check.
    pub fn labor_coefficient(&self, module: &Module) -> f64 {
        self.labor_base * module.labor_required * self.complexity_scalar(module.complexity_tier)
    }

    /// Labor-hours per day a crew of this composition supplies
    pub fn labor_supply(&self, colonists: u32, robots: u32) -> f64 {
        f64::from(colonists) * self.human_labor_hours + f64::from(robots) * self.robot_labor_hours
    }

    /// Estimated structural parts (kg) to assemble one unit of this module
    pub fn structural_parts(&self, module: &Module) -> f64 {
        self.mass_scalar(module.mass_tier) * self.parts_base_weight
    }

    /// Estimated electronic parts units to assemble one unit of this module
    pub fn electronic_parts(&self, module: &Module) -> f64 {
        self.complexity_scalar(module.complexity_tier)
    }

    /// Validate the tuning for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        for table in [&self.mass_scalars, &self.complexity_scalars] {
            if table.iter().any(|s| *s <= 0.0) {
                return Err("Tier scalars must be positive".into());
            }
            if table.windows(2).any(|w| w[0] >= w[1]) {
                return Err("Tier scalars must be strictly increasing".into());
            }
        }

        if self.labor_base <= 0.0 || self.human_labor_hours <= 0.0 || self.robot_labor_hours <= 0.0
        {
            return Err("Labor constants must be positive".into());
        }

        if self.solar_capacity_factor <= 0.0 || self.solar_capacity_factor >= 1.0 {
            return Err(format!(
                "solar_capacity_factor ({}) must lie in (0, 1)",
                self.solar_capacity_factor
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with_complexity(tier: ComplexityTier, labor: f64) -> Module {
        Module {
            complexity_tier: tier,
            labor_required: labor,
            ..Module::default()
        }
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unordered_scalars() {
        let mut tuning = Tuning::default();
        tuning.mass_scalars = [1.0, 0.5, 2.0, 3.0, 4.0];
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_solar_factor() {
        let mut tuning = Tuning::default();
        tuning.solar_capacity_factor = 1.5;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_labor_coefficient_scales_with_complexity() {
        let tuning = Tuning::default();
        let low = module_with_complexity(ComplexityTier::Low, 2.0);
        let ultra = module_with_complexity(ComplexityTier::Ultra, 2.0);

        assert!((tuning.labor_coefficient(&low) - 2.0).abs() < 1e-9);
        assert!((tuning.labor_coefficient(&ultra) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_labor_supply_mix() {
        let tuning = Tuning::default();
        // 2 colonists at 8h plus 1 robot at 24h
        assert!((tuning.labor_supply(2, 1) - 40.0).abs() < 1e-9);
        assert_eq!(tuning.labor_supply(0, 0), 0.0);
    }
}
