//! Load module/agent/environment/mission catalogs from TOML files
//!
//! Serde does the schema enforcement: an unknown tier name or a missing
//! required field fails the load with the offending file named. The core
//! treats a loaded catalog as validated input and never re-checks it.

use crate::catalog::agent::Agent;
use crate::catalog::environment::Environment;
use crate::catalog::mission::Mission;
use crate::catalog::module::Module;
use crate::core::error::{FootholdError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ModuleFile {
    modules: Vec<Module>,
}

#[derive(Debug, Deserialize)]
struct AgentFile {
    agents: Vec<Agent>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentFile {
    environments: Vec<Environment>,
}

#[derive(Debug, Deserialize)]
struct MissionFile {
    missions: Vec<Mission>,
}

/// All catalog records for one run, immutable once loaded
#[derive(Debug, Clone)]
pub struct Catalog {
    pub modules: Vec<Module>,
    pub agents: Vec<Agent>,
    pub environments: Vec<Environment>,
    pub missions: Vec<Mission>,
}

impl Catalog {
    pub fn environment(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == id)
    }

    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }
}

/// Load the four catalog files from a data directory
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let modules: ModuleFile = parse_file(&dir.join("modules.toml"))?;
    let agents: AgentFile = parse_file(&dir.join("agents.toml"))?;
    let environments: EnvironmentFile = parse_file(&dir.join("environments.toml"))?;
    let missions: MissionFile = parse_file(&dir.join("missions.toml"))?;

    tracing::info!(
        modules = modules.modules.len(),
        agents = agents.agents.len(),
        environments = environments.environments.len(),
        missions = missions.missions.len(),
        "catalog loaded"
    );

    Ok(Catalog {
        modules: modules.modules,
        agents: agents.agents,
        environments: environments.environments,
        missions: missions.missions,
    })
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| FootholdError::CatalogIo {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| FootholdError::CatalogParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
