// src/engine/base.rs

use super::Engine;
use crate::backend::Backend;
use crate::circuits::CircuitLayout;
use crate::core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shot-level statistics every engine carries: the shot count used for
/// averaging, and a histogram of classical outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEngine {
    total_shots: u64,
    counts: BTreeMap<String, u64>,
}

/// Rendered form of [`BaseEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseReport {
    pub shots: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub counts: BTreeMap<String, u64>,
}

impl BaseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_shots(&self) -> u64 {
        self.total_shots
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Records one shot with an optional classical outcome.
    pub fn record_shot(&mut self, outcome: Option<&str>) {
        self.total_shots += 1;
        if let Some(outcome) = outcome {
            *self.counts.entry(outcome.to_string()).or_insert(0) += 1;
        }
    }
}

impl Engine for BaseEngine {
    type Report = BaseReport;

    fn compute(&mut self, _layout: &dyn CircuitLayout, backend: &dyn Backend) -> Result<()> {
        self.record_shot(backend.classical_outcome());
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.total_shots += other.total_shots;
        for (outcome, n) in other.counts {
            *self.counts.entry(outcome).or_insert(0) += n;
        }
    }

    fn render(&self) -> BaseReport {
        BaseReport { shots: self.total_shots, counts: self.counts.clone() }
    }
}

impl fmt::Display for BaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shots: {}", self.shots)?;
        for (outcome, n) in &self.counts {
            writeln!(f, "  {}: {}", outcome, n)?;
        }
        Ok(())
    }
}
