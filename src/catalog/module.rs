//! Module catalog entries - the immutable building blocks of a loadout

use crate::catalog::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag a module must either find in the environment or have provided by a
/// pressurized shell. Modules requiring it are interior consumers and skip
/// direct thermal/pressure checks.
pub const PRESSURIZED_TAG: &str = "pressurized";

/// Ordinal mass bucket, mapped to a numeric scalar by the tuning tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassTier {
    /// Sensors, tools, small mechanical parts
    Micro,
    /// LED arrays, small pipes
    Small,
    /// Oxygen recyclers, batteries
    #[default]
    Standard,
    /// Sabatier reactors, smelters
    Heavy,
    /// Solar arrays, large habitats
    Massive,
}

/// Ordinal complexity bucket, mapped to a numeric scalar by the tuning tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    VeryLow,
    #[default]
    Low,
    Medium,
    High,
    Ultra,
}

/// An immutable habitat module catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,

    #[serde(default)]
    pub mass_tier: MassTier,
    #[serde(default)]
    pub complexity_tier: ComplexityTier,

    /// Base labor-hours per day one unit demands, before the complexity scalar
    #[serde(default = "default_labor_required")]
    pub labor_required: f64,

    /// Per-hour consumption rates
    #[serde(default)]
    pub inputs: BTreeMap<Resource, f64>,
    /// Per-hour production rates, plus static attributes like `capacity`
    #[serde(default)]
    pub outputs: BTreeMap<Resource, f64>,

    /// Survivable exterior temperature interval, degrees C
    #[serde(default = "default_temp_range")]
    pub temp_range: [f64; 2],
    /// Survivable exterior pressure interval, bar
    #[serde(default = "default_pressure_range")]
    pub pressure_range: [f64; 2],
    /// Maximum gravity the structure tolerates, m/s^2
    #[serde(default = "default_max_gravity")]
    pub max_gravity: f64,

    /// Capability tags the module needs present to activate
    #[serde(default)]
    pub requires_env_tags: Vec<String>,
    /// Capability tags the module grants while present
    #[serde(default)]
    pub provides_tags: Vec<String>,

    /// Other modules this one depends on, checked at authoring time only
    #[serde(default)]
    pub dependencies: Vec<String>,
}

fn default_labor_required() -> f64 {
    1.0
}

fn default_temp_range() -> [f64; 2] {
    [-273.15, 1000.0]
}

fn default_pressure_range() -> [f64; 2] {
    [0.0, 10.0]
}

fn default_max_gravity() -> f64 {
    20.0
}

impl Default for Module {
    fn default() -> Self {
        Self {
            name: String::new(),
            mass_tier: MassTier::default(),
            complexity_tier: ComplexityTier::default(),
            labor_required: default_labor_required(),
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            temp_range: default_temp_range(),
            pressure_range: default_pressure_range(),
            max_gravity: default_max_gravity(),
            requires_env_tags: Vec::new(),
            provides_tags: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

impl Module {
    /// Per-hour consumption rate for one resource (0 if absent)
    pub fn input(&self, resource: &Resource) -> f64 {
        self.inputs.get(resource).copied().unwrap_or(0.0)
    }

    /// Per-hour production rate for one resource (0 if absent)
    pub fn output(&self, resource: &Resource) -> f64 {
        self.outputs.get(resource).copied().unwrap_or(0.0)
    }

    /// Interior consumer: lives inside a pressurized shell and skips direct
    /// thermal and pressure checks
    pub fn is_internal(&self) -> bool {
        self.requires_env_tags.iter().any(|t| t == PRESSURIZED_TAG)
    }

    /// Solar generator, by catalog naming convention
    ///
    /// The solver derates these by the capacity factor; the engine scales
    /// them by the instantaneous solar multiplier.
    pub fn is_solar(&self) -> bool {
        self.name.contains("Solar")
    }

    /// Battery: carries a storage ceiling rather than steady generation
    pub fn is_battery(&self) -> bool {
        self.output(&Resource::Capacity) > 0.0 || self.name.contains("Battery")
    }

    /// Whether this module grants a capability tag while present
    pub fn provides(&self, tag: &str) -> bool {
        self.provides_tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_permissive() {
        let module = Module::default();
        assert_eq!(module.temp_range, [-273.15, 1000.0]);
        assert_eq!(module.pressure_range, [0.0, 10.0]);
        assert_eq!(module.max_gravity, 20.0);
        assert_eq!(module.labor_required, 1.0);
        assert!(!module.is_internal());
    }

    #[test]
    fn test_internal_detection() {
        let module = Module {
            requires_env_tags: vec![PRESSURIZED_TAG.into()],
            ..Module::default()
        };
        assert!(module.is_internal());
    }

    #[test]
    fn test_battery_detection_by_capacity_output() {
        let module = Module {
            name: "Power_Cell".into(),
            outputs: BTreeMap::from([(Resource::Capacity, 250.0)]),
            ..Module::default()
        };
        assert!(module.is_battery());
        assert!(!module.is_solar());
    }

    #[test]
    fn test_solar_detection_by_name() {
        let module = Module {
            name: "Solar_Array".into(),
            outputs: BTreeMap::from([(Resource::Power, 120.0)]),
            ..Module::default()
        };
        assert!(module.is_solar());
        assert!(!module.is_battery());
    }

    #[test]
    fn test_toml_parse_with_defaults() {
        let toml_str = r#"
name = "Oxygen_Recycler"
mass_tier = "standard"
complexity_tier = "medium"
labor_required = 1.5
requires_env_tags = ["pressurized"]

[inputs]
power = 5.0

[outputs]
oxygen = 3.0
"#;
        let module: Module = toml::from_str(toml_str).unwrap();

        assert_eq!(module.complexity_tier, ComplexityTier::Medium);
        assert_eq!(module.input(&Resource::Power), 5.0);
        assert_eq!(module.output(&Resource::Oxygen), 3.0);
        assert_eq!(module.output(&Resource::Power), 0.0);
        assert!(module.is_internal());
        // Unset physical limits fall back to the permissive defaults
        assert_eq!(module.max_gravity, 20.0);
    }

    #[test]
    fn test_unknown_tier_name_fails_parse() {
        let toml_str = r#"
name = "Mystery_Box"
mass_tier = "colossal"
"#;
        assert!(toml::from_str::<Module>(toml_str).is_err());
    }
}
