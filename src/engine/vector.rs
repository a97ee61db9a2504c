// src/engine/vector.rs

use super::{BaseEngine, BaseReport, Engine};
use crate::accumulator::SnapshotAccumulator;
use crate::backend::Backend;
use crate::circuits::CircuitLayout;
use crate::compute::StatisticsComputer;
use crate::config::EngineConfig;
use crate::core::Result;
use crate::render::{Renderer, SnapshotReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Engine for state-vector simulators: shot counts plus snapshot statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorEngine {
    config: EngineConfig,
    base: BaseEngine,
    snapshots: SnapshotAccumulator,
}

/// Output document of a [`VectorEngine`]; both parts share one object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorReport {
    #[serde(flatten)]
    pub base: BaseReport,
    #[serde(flatten)]
    pub snapshots: SnapshotReport,
}

impl VectorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Builds an engine from a configuration document.
    pub fn from_document(doc: &Value) -> Self {
        Self::new(EngineConfig::from_document(doc))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn base(&self) -> &BaseEngine {
        &self.base
    }

    pub fn accumulator(&self) -> &SnapshotAccumulator {
        &self.snapshots
    }

    pub fn total_shots(&self) -> u64 {
        self.base.total_shots()
    }
}

impl Engine for VectorEngine {
    type Report = VectorReport;

    /// Snapshot statistics go first: a `SizeMismatch` leaves the engine,
    /// shot count included, exactly as it was.
    fn compute(&mut self, layout: &dyn CircuitLayout, backend: &dyn Backend) -> Result<()> {
        StatisticsComputer::new(&self.config).compute(layout, backend, &mut self.snapshots)?;
        self.base.compute(layout, backend)
    }

    fn merge(&mut self, other: Self) {
        self.base.merge(other.base);
        self.snapshots.merge(other.snapshots);
    }

    fn render(&self) -> VectorReport {
        VectorReport {
            base: self.base.render(),
            snapshots: Renderer::from_config(&self.config).render(&self.snapshots, self.total_shots()),
        }
    }
}

impl fmt::Display for VectorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        write!(f, "{}", self.snapshots)
    }
}
