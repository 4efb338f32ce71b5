//! Foothold - habitat loadout planning and survival simulation
//!
//! Given a module catalog, an agent roster, an environment and a mission,
//! Foothold picks a minimal loadout with a mixed-integer solver and then
//! validates that loadout by replaying resource flow hour by hour.

pub mod catalog;
pub mod core;
pub mod planning;
pub mod simulation;
