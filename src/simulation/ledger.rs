//! Resource ledger - per-run mutable stockpiles
//!
//! Owned exclusively by one simulation run. Backed by a BTreeMap so that
//! snapshots, failure scans and float accumulation follow one stable order,
//! keeping repeated runs byte-identical.

use crate::catalog::resource::Resource;
use std::collections::BTreeMap;

/// Round to two decimals, matching the ledger's bookkeeping resolution
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    entries: BTreeMap<Resource, f64>,
}

impl Ledger {
    pub fn new(initial: &BTreeMap<Resource, f64>) -> Self {
        Self {
            entries: initial.clone(),
        }
    }

    pub fn get(&self, resource: &Resource) -> f64 {
        self.entries.get(resource).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, resource: Resource, value: f64) {
        self.entries.insert(resource, round2(value));
    }

    pub fn credit(&mut self, resource: &Resource, amount: f64) {
        self.set(resource.clone(), self.get(resource) + amount);
    }

    pub fn debit(&mut self, resource: &Resource, amount: f64) {
        self.set(resource.clone(), self.get(resource) - amount);
    }

    /// First negative entry in ledger order, skipping one exempt resource
    pub fn first_negative_except(&self, exempt: &Resource) -> Option<(&Resource, f64)> {
        self.entries
            .iter()
            .filter(|(resource, _)| *resource != exempt)
            .find(|(_, value)| **value < 0.0)
            .map(|(resource, value)| (resource, *value))
    }

    /// One-line snapshot of every entry, for the hourly log
    pub fn snapshot(&self) -> String {
        self.entries
            .iter()
            .map(|(resource, value)| format!("{}: {}", title_case(resource.as_str()), value))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn into_map(self) -> BTreeMap<Resource, f64> {
        self.entries
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
