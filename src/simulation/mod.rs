//! Hour-by-hour replay of an instantiated loadout

pub mod engine;
pub mod ledger;
