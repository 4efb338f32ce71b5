//! Agent roster entries - the crew side of a loadout

use crate::catalog::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    Human,
    Robotic,
}

/// An agent profile: per-head upkeep rates and the roster headcount
///
/// Labor supply per head is a tuning constant (8 labor-hours/day for
/// humans, 24 for robots), not a profile field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub category: AgentCategory,

    /// Per-hour consumption rates per head
    #[serde(default)]
    pub inputs: BTreeMap<Resource, f64>,

    /// Roster headcount for this profile
    #[serde(default)]
    pub count: u32,
}

impl Agent {
    /// Per-hour consumption rate of one resource per head (0 if absent)
    pub fn input(&self, resource: &Resource) -> f64 {
        self.inputs.get(resource).copied().unwrap_or(0.0)
    }
}

/// Per-head drain of a resource for the first profile of a category
///
/// The solver treats the roster as one representative profile per category;
/// duplicated profiles beyond the first are ignored.
pub fn category_drain(agents: &[Agent], category: AgentCategory, resource: &Resource) -> f64 {
    agents
        .iter()
        .find(|a| a.category == category)
        .map(|a| a.input(resource))
        .unwrap_or(0.0)
}

/// Whether the roster carries any human headcount (crewed housing required)
pub fn humans_present(agents: &[Agent]) -> bool {
    agents
        .iter()
        .any(|a| a.category == AgentCategory::Human && a.count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Agent> {
        vec![
            Agent {
                name: "colonist".into(),
                category: AgentCategory::Human,
                inputs: BTreeMap::from([(Resource::Oxygen, 0.035), (Resource::Food, 0.13)]),
                count: 4,
            },
            Agent {
                name: "service_robot".into(),
                category: AgentCategory::Robotic,
                inputs: BTreeMap::from([(Resource::Power, 0.5)]),
                count: 2,
            },
        ]
    }

    #[test]
    fn test_category_drain_lookup() {
        let agents = roster();
        assert_eq!(
            category_drain(&agents, AgentCategory::Human, &Resource::Oxygen),
            0.035
        );
        assert_eq!(
            category_drain(&agents, AgentCategory::Robotic, &Resource::Power),
            0.5
        );
        // Absent resource or absent category drains nothing
        assert_eq!(
            category_drain(&agents, AgentCategory::Human, &Resource::Power),
            0.0
        );
        assert_eq!(
            category_drain(&[], AgentCategory::Human, &Resource::Food),
            0.0
        );
    }

    #[test]
    fn test_humans_present() {
        assert!(humans_present(&roster()));

        let robots_only: Vec<Agent> = roster()
            .into_iter()
            .filter(|a| a.category == AgentCategory::Robotic)
            .collect();
        assert!(!humans_present(&robots_only));

        let mut zero_count = roster();
        zero_count[0].count = 0;
        assert!(!humans_present(&zero_count));
    }

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
name = "colonist"
category = "human"
count = 4

[inputs]
water = 0.12
"#;
        let agent: Agent = toml::from_str(toml_str).unwrap();
        assert_eq!(agent.category, AgentCategory::Human);
        assert_eq!(agent.input(&Resource::Water), 0.12);
    }
}
