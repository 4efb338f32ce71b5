//! Loadout planning: compatibility filtering and MILP optimization

pub mod compat;
mod constraints;
pub mod solver;
