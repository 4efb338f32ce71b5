//! Module compatibility filter - gates a catalog against one environment
//!
//! Pure and total: every module lands in exactly one of the compatible list
//! or the rejection report, and running the filter on its own output is a
//! no-op.

use crate::catalog::environment::Environment;
use crate::catalog::module::{Module, PRESSURIZED_TAG};
use ahash::AHashSet;
use std::collections::BTreeMap;

/// Outcome of filtering one catalog against one environment
#[derive(Debug, Clone, PartialEq)]
pub struct CompatReport {
    pub compatible: Vec<Module>,
    /// Rejected module name -> human-readable failure reasons
    pub rejected: BTreeMap<String, Vec<String>>,
}

/// Partition a module catalog into environment-compatible and rejected sets
///
/// Interior consumers (modules requiring the "pressurized" tag) live inside
/// a pressurized shell and skip the direct thermal and pressure checks;
/// gravity and the remaining tag checks apply to every module.
pub fn filter_compatible_modules(modules: &[Module], environment: &Environment) -> CompatReport {
    let env_tags: AHashSet<&str> = environment.tags.iter().map(String::as_str).collect();

    let mut compatible = Vec::new();
    let mut rejected = BTreeMap::new();

    for module in modules {
        let mut errors = Vec::new();
        let internal = module.is_internal();

        if !internal {
            if environment.temperature.min < module.temp_range[0] {
                errors.push(format!(
                    "Thermal: {}°C is below module limit {}°C.",
                    environment.temperature.min, module.temp_range[0]
                ));
            }
            if environment.temperature.max > module.temp_range[1] {
                errors.push(format!(
                    "Thermal: {}°C is above module limit {}°C.",
                    environment.temperature.max, module.temp_range[1]
                ));
            }

            let pressure = environment.atmosphere.pressure;
            if pressure < module.pressure_range[0] || pressure > module.pressure_range[1] {
                errors.push(format!(
                    "Pressure: {} bar is outside [{}, {}].",
                    pressure, module.pressure_range[0], module.pressure_range[1]
                ));
            }
        }

        if environment.gravity > module.max_gravity {
            errors.push(format!(
                "Gravity: {} exceeds limit {}.",
                environment.gravity, module.max_gravity
            ));
        }

        for tag in &module.requires_env_tags {
            if tag == PRESSURIZED_TAG {
                continue;
            }
            if !env_tags.contains(tag.as_str()) {
                errors.push(format!("Tag: Missing '{tag}'."));
            }
        }

        if errors.is_empty() {
            compatible.push(module.clone());
        } else {
            tracing::debug!(module = %module.name, reasons = errors.len(), "module rejected");
            rejected.insert(module.name.clone(), errors);
        }
    }

    tracing::info!(
        "{} of {} modules passed physics checks",
        compatible.len(),
        modules.len()
    );

    CompatReport {
        compatible,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::environment::{Atmosphere, TemperatureRange};

    fn mars() -> Environment {
        Environment {
            id: "mars_plain".into(),
            name: "Acidalia Planitia".into(),
            tags: vec!["solar_exposure".into(), "regolith".into()],
            temperature: TemperatureRange {
                min: -90.0,
                max: -10.0,
            },
            atmosphere: Atmosphere { pressure: 0.006 },
            gravity: 3.71,
            initial_resources: BTreeMap::new(),
        }
    }

    fn hardened(name: &str) -> Module {
        Module {
            name: name.into(),
            temp_range: [-150.0, 120.0],
            pressure_range: [0.0, 2.0],
            max_gravity: 12.0,
            ..Module::default()
        }
    }

    #[test]
    fn test_partition_is_exact() {
        let modules = vec![
            hardened("Solar_Array"),
            Module {
                name: "Fragile_Sensor".into(),
                temp_range: [-20.0, 60.0],
                ..Module::default()
            },
        ];

        let report = filter_compatible_modules(&modules, &mars());
        assert_eq!(report.compatible.len() + report.rejected.len(), modules.len());
        assert_eq!(report.compatible[0].name, "Solar_Array");
        assert!(report.rejected.contains_key("Fragile_Sensor"));
        // No module appears on both sides
        for module in &report.compatible {
            assert!(!report.rejected.contains_key(&module.name));
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let modules = vec![hardened("Solar_Array"), hardened("RTG_Unit")];
        let first = filter_compatible_modules(&modules, &mars());
        let second = filter_compatible_modules(&first.compatible, &mars());

        assert_eq!(first.compatible, second.compatible);
        assert!(second.rejected.is_empty());
    }

    #[test]
    fn test_internal_module_skips_thermal_and_pressure() {
        let module = Module {
            name: "Oxygen_Recycler".into(),
            temp_range: [15.0, 30.0],
            pressure_range: [0.9, 1.1],
            requires_env_tags: vec![PRESSURIZED_TAG.into()],
            max_gravity: 12.0,
            ..Module::default()
        };

        // Mars is far outside the recycler's comfort band, but it lives
        // inside a shell, so only gravity applies.
        let report = filter_compatible_modules(&[module], &mars());
        assert_eq!(report.compatible.len(), 1);
    }

    #[test]
    fn test_gravity_check_applies_to_internal_modules() {
        let module = Module {
            name: "Delicate_Centrifuge".into(),
            requires_env_tags: vec![PRESSURIZED_TAG.into()],
            max_gravity: 2.0,
            ..Module::default()
        };

        let report = filter_compatible_modules(&[module], &mars());
        let reasons = &report.rejected["Delicate_Centrifuge"];
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].starts_with("Gravity:"));
    }

    #[test]
    fn test_missing_tag_is_reported() {
        let module = Module {
            name: "Ice_Drill".into(),
            temp_range: [-150.0, 120.0],
            pressure_range: [0.0, 2.0],
            requires_env_tags: vec!["ice_deposits".into()],
            ..Module::default()
        };

        let report = filter_compatible_modules(&[module], &mars());
        let reasons = &report.rejected["Ice_Drill"];
        assert!(reasons.iter().any(|r| r.contains("ice_deposits")));
    }

    #[test]
    fn test_rejection_collects_every_failure() {
        let module = Module {
            name: "Greenhouse_Shell".into(),
            temp_range: [-20.0, 40.0],
            pressure_range: [0.5, 1.5],
            max_gravity: 2.0,
            requires_env_tags: vec!["flat_bedrock".into()],
            ..Module::default()
        };

        let report = filter_compatible_modules(&[module], &mars());
        // Thermal (min), pressure, gravity and tag all fail
        assert_eq!(report.rejected["Greenhouse_Shell"].len(), 4);
    }
}
