//! Mission definitions and post-simulation goal evaluation

use crate::catalog::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One mission requirement: a minimum and/or maximum against a named metric
///
/// Requirement names are open strings rather than `Resource` variants:
/// resource names and their `_resilience` variants are understood by the
/// solver and the goal evaluation, anything else rides along for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    pub metric: String,
}

/// Pins a minimum count of one named module into any accepted loadout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCountRequirement {
    /// Module name; spaces are normalized to underscores on lookup
    pub metric: String,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub description: String,
    /// Environment id this mission deploys into
    pub environment: String,
    pub duration_hours: u32,

    #[serde(default)]
    pub requirements: BTreeMap<String, Requirement>,

    #[serde(default)]
    pub module_num: Option<ModuleCountRequirement>,
}

/// One requirement checked against the final ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalOutcome {
    pub requirement: String,
    pub target: f64,
    pub actual: f64,
    pub met: bool,
}

impl Mission {
    /// Minimum for a requirement name, falling back to its `_resilience` variant
    pub fn requirement_minimum(&self, name: &str) -> f64 {
        self.requirements
            .get(name)
            .or_else(|| self.requirements.get(&format!("{name}_resilience")))
            .and_then(|r| r.minimum)
            .unwrap_or(0.0)
    }

    /// Compare every requirement against the final resource ledger
    ///
    /// `_resilience` variants check the stockpile of their base resource.
    /// Requirements without a minimum or maximum are skipped, as is the
    /// legacy `duration` entry (the simulation loop itself enforces it).
    pub fn evaluate(&self, resources: &BTreeMap<Resource, f64>) -> Vec<GoalOutcome> {
        let mut outcomes = Vec::new();

        for (name, requirement) in &self.requirements {
            if name == "duration" {
                continue;
            }

            let base = name.strip_suffix("_resilience").unwrap_or(name);
            let actual = resources
                .get(&Resource::from(base))
                .copied()
                .unwrap_or(0.0);

            if let Some(minimum) = requirement.minimum {
                outcomes.push(GoalOutcome {
                    requirement: name.clone(),
                    target: minimum,
                    actual,
                    met: actual >= minimum,
                });
            } else if let Some(maximum) = requirement.maximum {
                outcomes.push(GoalOutcome {
                    requirement: name.clone(),
                    target: maximum,
                    actual,
                    met: actual <= maximum,
                });
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission_with(requirements: &[(&str, Option<f64>, Option<f64>)]) -> Mission {
        Mission {
            id: "test".into(),
            description: String::new(),
            environment: "mars_plain".into(),
            duration_hours: 72,
            requirements: requirements
                .iter()
                .map(|(name, minimum, maximum)| {
                    (
                        name.to_string(),
                        Requirement {
                            minimum: *minimum,
                            maximum: *maximum,
                            metric: "kg".into(),
                        },
                    )
                })
                .collect(),
            module_num: None,
        }
    }

    #[test]
    fn test_requirement_minimum_falls_back_to_resilience() {
        let mission = mission_with(&[("oxygen_resilience", Some(50.0), None)]);
        assert_eq!(mission.requirement_minimum("oxygen"), 50.0);
        assert_eq!(mission.requirement_minimum("water"), 0.0);

        // A direct entry wins over the resilience variant
        let direct = mission_with(&[
            ("oxygen", Some(20.0), None),
            ("oxygen_resilience", Some(50.0), None),
        ]);
        assert_eq!(direct.requirement_minimum("oxygen"), 20.0);
    }

    #[test]
    fn test_evaluate_minimum_and_maximum() {
        let mission = mission_with(&[("oxygen", Some(50.0), None), ("waste", None, Some(10.0))]);

        let resources = BTreeMap::from([(Resource::Oxygen, 60.0), (Resource::Waste, 25.0)]);
        let outcomes = mission.evaluate(&resources);
        assert_eq!(outcomes.len(), 2);

        let oxygen = outcomes.iter().find(|o| o.requirement == "oxygen").unwrap();
        assert!(oxygen.met);

        let waste = outcomes.iter().find(|o| o.requirement == "waste").unwrap();
        assert!(!waste.met, "waste above its maximum should fail the goal");
    }

    #[test]
    fn test_evaluate_resilience_reads_base_resource() {
        let mission = mission_with(&[("power_resilience", Some(200.0), None)]);
        let resources = BTreeMap::from([(Resource::Power, 250.0)]);

        let outcomes = mission.evaluate(&resources);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].met);
    }

    #[test]
    fn test_evaluate_skips_duration() {
        let mission = mission_with(&[("duration", Some(72.0), None)]);
        assert!(mission.evaluate(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_toml_parse_with_module_floor() {
        let toml_str = r#"
id = "mars_foothold"
description = "72-hour foothold"
environment = "mars_plain"
duration_hours = 72

[requirements.oxygen]
minimum = 50.0
metric = "kg"

[module_num]
metric = "Solar_Array"
minimum = 2
"#;
        let mission: Mission = toml::from_str(toml_str).unwrap();
        assert_eq!(mission.duration_hours, 72);
        assert_eq!(mission.module_num.as_ref().unwrap().minimum, 2);
        assert_eq!(mission.requirement_minimum("oxygen"), 50.0);
    }
}
