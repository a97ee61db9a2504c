// src/compute/mod.rs

//! Derives the enabled statistics from one shot's snapshots and folds them
//! into an accumulator.

use crate::accumulator::SnapshotAccumulator;
use crate::backend::Backend;
use crate::circuits::CircuitLayout;
use crate::config::EngineConfig;
use crate::core::{AmplitudeVector, DensityMatrix, Result, SnapshotLabel};
use crate::format::{chop_complex, ket_probabilities, vector_to_ket};
use crate::validation::check_target_sizes;
use num_complex::Complex64;
use std::collections::BTreeMap;
use tracing::trace;

/// Per-shot statistics computer bound to one resolved configuration.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsComputer<'a> {
    config: &'a EngineConfig,
}

impl<'a> StatisticsComputer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Processes the shot exposed by `backend`.
    ///
    /// # Errors
    /// Returns `SizeMismatch` if an inner-product category is enabled and a
    /// target state's length differs from a snapshot's. The accumulator is
    /// left untouched in that case.
    pub fn compute(
        &self,
        layout: &dyn CircuitLayout,
        backend: &dyn Backend,
        acc: &mut SnapshotAccumulator,
    ) -> Result<()> {
        trace!(
            working_dim = backend.working_state().dim(),
            snapshots = backend.snapshots().len(),
            "computing shot statistics"
        );
        let groups = if self.config.selectors.needs_ket_form() {
            layout.ket_groups()
        } else {
            Vec::new()
        };
        self.fold_snapshots(&groups, backend.snapshots(), acc)
    }

    /// Folds the statistics of one shot's snapshots into `acc`.
    ///
    /// `groups` are the ket digit-group sizes (see [`CircuitLayout::ket_groups`]).
    /// Categories that are disabled, or that have nothing to work on, create
    /// no entries.
    pub fn fold_snapshots(
        &self,
        groups: &[usize],
        snapshots: &BTreeMap<SnapshotLabel, AmplitudeVector>,
        acc: &mut SnapshotAccumulator,
    ) -> Result<()> {
        if snapshots.is_empty() {
            return Ok(());
        }
        let config = self.config;
        let selectors = config.selectors;
        let with_targets = selectors.needs_inner_products() && !config.target_states.is_empty();

        // Validate everything up front so a failing shot commits nothing.
        if with_targets {
            for (&label, psi) in snapshots {
                check_target_sizes(label, psi, &config.target_states)?;
            }
        }

        if selectors.needs_ket_form() {
            let kets: BTreeMap<_, _> = snapshots
                .iter()
                .map(|(&label, psi)| {
                    (label, vector_to_ket(psi, config.qudit_dim, config.chop, groups))
                })
                .collect();
            if selectors.probabilities_ket {
                for (&label, ket) in &kets {
                    acc.probabilities_ket.fold(label, ket_probabilities(ket));
                }
            }
            if selectors.ket {
                acc.kets.push(kets);
            }
        }

        if selectors.density {
            for (&label, psi) in snapshots {
                acc.density.fold(label, DensityMatrix::outer_product(psi));
            }
        }

        if selectors.probabilities {
            for (&label, psi) in snapshots {
                acc.probabilities.fold(label, psi.probabilities());
            }
        }

        if with_targets {
            for (&label, psi) in snapshots {
                let inner: Vec<Complex64> = config
                    .target_states
                    .iter()
                    .map(|target| chop_complex(psi.inner_product(target), config.chop))
                    .collect();
                if selectors.overlaps {
                    acc.overlaps.fold(label, inner.iter().map(|c| c.norm_sqr()).collect());
                }
                if selectors.inner_products {
                    acc.inner_products.push(label, inner);
                }
            }
        }

        Ok(())
    }
}
