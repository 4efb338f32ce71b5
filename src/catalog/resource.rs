//! Closed resource vocabulary with an open extension point
//!
//! Constraint construction and the simulation ledger share this enum, so a
//! typo in a resource name becomes a `Custom` variant instead of a silent
//! zero in one layer and a real flow in the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource kind flowing through modules, agents and the ledger
///
/// Known kinds cover everything the core models; `Custom` carries
/// mission-specific metrics through untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Resource {
    Power,
    Food,
    Oxygen,
    Water,
    Waste,
    Light,
    Hydrogen,
    /// Crew/equipment slots inside a pressurized shell (never stockpiled)
    HabitatSpace,
    /// Battery storage ceiling (never added to the ledger)
    Capacity,
    /// Battery charge rate, read by the solver as nighttime discharge capability
    ChargeIn,
    /// Battery discharge rate limit (unmodeled, ignored by the engine)
    DischargeOut,
    /// Pseudo-input marking modules that need direct sunlight
    SolarExposure,
    /// Ledger entry seeded from the labor supply/demand balance
    Labour,
    Custom(String),
}

impl Resource {
    /// The resources the solver writes a sustainment constraint for
    pub const TRACKED: [Resource; 7] = [
        Resource::Power,
        Resource::Food,
        Resource::Oxygen,
        Resource::Water,
        Resource::Waste,
        Resource::Light,
        Resource::Hydrogen,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Resource::Power => "power",
            Resource::Food => "food",
            Resource::Oxygen => "oxygen",
            Resource::Water => "water",
            Resource::Waste => "waste",
            Resource::Light => "light",
            Resource::Hydrogen => "hydrogen",
            Resource::HabitatSpace => "habitat_space",
            Resource::Capacity => "capacity",
            Resource::ChargeIn => "charge_in",
            Resource::DischargeOut => "discharge_out",
            Resource::SolarExposure => "solar_exposure",
            Resource::Labour => "labour",
            Resource::Custom(name) => name,
        }
    }
}

impl From<&str> for Resource {
    fn from(name: &str) -> Self {
        match name {
            "power" => Resource::Power,
            "food" => Resource::Food,
            "oxygen" => Resource::Oxygen,
            "water" => Resource::Water,
            "waste" => Resource::Waste,
            "light" => Resource::Light,
            "hydrogen" => Resource::Hydrogen,
            "habitat_space" => Resource::HabitatSpace,
            "capacity" => Resource::Capacity,
            "charge_in" => Resource::ChargeIn,
            "discharge_out" => Resource::DischargeOut,
            "solar_exposure" => Resource::SolarExposure,
            "labour" => Resource::Labour,
            other => Resource::Custom(other.to_string()),
        }
    }
}

impl From<String> for Resource {
    fn from(name: String) -> Self {
        Resource::from(name.as_str())
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.as_str().to_string()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_round_trip() {
        for resource in Resource::TRACKED {
            let name = resource.as_str().to_string();
            assert_eq!(Resource::from(name), resource);
        }
        assert_eq!(Resource::from("charge_in"), Resource::ChargeIn);
        assert_eq!(Resource::from("habitat_space"), Resource::HabitatSpace);
    }

    #[test]
    fn test_unknown_name_becomes_custom() {
        let resource = Resource::from("regolith_samples");
        assert_eq!(resource, Resource::Custom("regolith_samples".into()));
        assert_eq!(resource.as_str(), "regolith_samples");
    }

    #[test]
    fn test_tracked_excludes_static_attributes() {
        assert_eq!(Resource::TRACKED.len(), 7);
        assert!(!Resource::TRACKED.contains(&Resource::Capacity));
        assert!(!Resource::TRACKED.contains(&Resource::HabitatSpace));
    }

    #[test]
    fn test_serde_map_keys() {
        use std::collections::BTreeMap;

        let toml_str = "power = 5.0\nregolith_samples = 1.5\n";
        let rates: BTreeMap<Resource, f64> = toml::from_str(toml_str).unwrap();

        assert_eq!(rates[&Resource::Power], 5.0);
        assert_eq!(rates[&Resource::Custom("regolith_samples".into())], 1.5);
    }
}
