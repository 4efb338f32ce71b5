//! Catalog records: modules, agents, environments and missions
//!
//! These are immutable once loaded and safely shared read-only across
//! independent solve/simulate invocations.

pub mod agent;
pub mod dependencies;
pub mod environment;
pub mod loader;
pub mod mission;
pub mod module;
pub mod resource;
