//! Environment descriptors - the physics a loadout must survive

use crate::catalog::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Surface pressure, bar
    pub pressure: f64,
}

/// One deployment site: ambient physics plus starting stockpiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,

    /// Capability tags the site grants (e.g. "solar_exposure")
    #[serde(default)]
    pub tags: Vec<String>,

    pub temperature: TemperatureRange,
    pub atmosphere: Atmosphere,
    /// Surface gravity, m/s^2
    pub gravity: f64,

    /// Stockpiles present before the first simulated hour
    #[serde(default)]
    pub initial_resources: BTreeMap<Resource, f64>,
}

impl Environment {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
id = "mars_plain"
name = "Acidalia Planitia"
tags = ["solar_exposure", "regolith"]
gravity = 3.71

[temperature]
min = -90.0
max = -10.0

[atmosphere]
pressure = 0.006

[initial_resources]
power = 100.0
water = 40.0
"#;
        let env: Environment = toml::from_str(toml_str).unwrap();
        assert!(env.has_tag("solar_exposure"));
        assert!(!env.has_tag("vacuum"));
        assert_eq!(env.temperature.min, -90.0);
        assert_eq!(env.initial_resources[&Resource::Water], 40.0);
    }
}
