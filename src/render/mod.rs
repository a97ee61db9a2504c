// src/render/mod.rs

//! Turns a final accumulator into the output document.
//!
//! Summed categories are averaged over the shot count, per-shot categories
//! are emitted as recorded, and everything is chopped. A category appears in
//! the document only if it is enabled and has data.

use crate::accumulator::{KetSnapshot, SnapshotAccumulator};
use crate::config::{EngineConfig, OutputSelectors};
use crate::core::{Result, SnapshotLabel};
use crate::format::{Ket, ProbabilityKet, chop_complex, chop_complexes, chop_real, chop_reals};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The snapshot section of an output document.
///
/// Complex numbers serialize as `[re, im]`; labels become object keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_state_ket: Option<Vec<KetSnapshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_matrix: Option<BTreeMap<SnapshotLabel, Vec<Vec<Complex64>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<SnapshotLabel, Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities_ket: Option<BTreeMap<SnapshotLabel, ProbabilityKet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_products: Option<BTreeMap<SnapshotLabel, Vec<Vec<Complex64>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlaps: Option<BTreeMap<SnapshotLabel, Vec<f64>>>,
}

impl SnapshotReport {
    /// True if no field would be emitted.
    pub fn is_empty(&self) -> bool {
        self.quantum_state_ket.is_none()
            && self.density_matrix.is_none()
            && self.probabilities.is_none()
            && self.probabilities_ket.is_none()
            && self.inner_products.is_none()
            && self.overlaps.is_none()
    }
}

/// Renders accumulators with a fixed threshold and selector set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    chop: f64,
    selectors: OutputSelectors,
}

impl Renderer {
    pub fn new(chop: f64, selectors: OutputSelectors) -> Self {
        Self { chop, selectors }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.chop, config.selectors)
    }

    /// Builds the report for `acc` averaged over `total_shots`.
    ///
    /// Reads `acc` only, so repeated calls give identical reports. With zero
    /// shots the sums are emitted unscaled.
    pub fn render(&self, acc: &SnapshotAccumulator, total_shots: u64) -> SnapshotReport {
        let renorm = if total_shots == 0 { 1.0 } else { 1.0 / total_shots as f64 };
        let eps = self.chop;
        let sel = self.selectors;
        let mut report = SnapshotReport::default();

        if sel.ket && !acc.kets.is_empty() {
            let kets: Vec<KetSnapshot> = acc
                .kets
                .iter()
                .map(|shot| {
                    shot.iter()
                        .map(|(&label, ket)| {
                            let chopped = ket.iter().map(|(k, &v)| (k.clone(), chop_complex(v, eps)));
                            (label, chopped.collect::<Ket>())
                        })
                        .collect()
                })
                .collect();
            report.quantum_state_ket = Some(kets);
        }

        if sel.density && !acc.density.is_empty() {
            let rhos: BTreeMap<_, _> = acc
                .density
                .iter()
                .map(|(&label, rho)| {
                    let mut rho = rho.scaled(renorm);
                    rho.map_in_place(|c| chop_complex(c, eps));
                    (label, rho.rows())
                })
                .collect();
            report.density_matrix = Some(rhos);
        }

        if sel.probabilities && !acc.probabilities.is_empty() {
            report.probabilities = Some(averaged_reals(acc.probabilities.iter(), renorm, eps));
        }

        if sel.probabilities_ket && !acc.probabilities_ket.is_empty() {
            let probs: BTreeMap<_, _> = acc
                .probabilities_ket
                .iter()
                .map(|(&label, ket)| {
                    let scaled = ket.iter().map(|(k, &p)| (k.clone(), chop_real(p * renorm, eps)));
                    (label, scaled.collect::<ProbabilityKet>())
                })
                .collect();
            report.probabilities_ket = Some(probs);
        }

        if sel.inner_products && !acc.inner_products.is_empty() {
            let inner: BTreeMap<_, _> = acc
                .inner_products
                .iter()
                .map(|(&label, shots)| {
                    let chopped = shots.iter().map(|values| {
                        let mut values = values.clone();
                        chop_complexes(&mut values, eps);
                        values
                    });
                    (label, chopped.collect::<Vec<_>>())
                })
                .collect();
            report.inner_products = Some(inner);
        }

        if sel.overlaps && !acc.overlaps.is_empty() {
            report.overlaps = Some(averaged_reals(acc.overlaps.iter(), renorm, eps));
        }

        report
    }

    /// Renders `acc` straight to a JSON document.
    pub fn encode(&self, acc: &SnapshotAccumulator, total_shots: u64) -> Result<Value> {
        Ok(serde_json::to_value(self.render(acc, total_shots))?)
    }
}

fn averaged_reals<'a>(
    sums: impl Iterator<Item = (&'a SnapshotLabel, &'a Vec<f64>)>,
    renorm: f64,
    eps: f64,
) -> BTreeMap<SnapshotLabel, Vec<f64>> {
    sums.map(|(&label, sum)| {
        let mut values: Vec<f64> = sum.iter().map(|v| v * renorm).collect();
        chop_reals(&mut values, eps);
        (label, values)
    })
    .collect()
}

impl fmt::Display for SnapshotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Snapshot Report:")?;
        if self.is_empty() {
            return writeln!(f, "  No snapshot data.");
        }
        if let Some(kets) = &self.quantum_state_ket {
            writeln!(f, "  quantum_state_ket: {} shot(s)", kets.len())?;
        }
        if let Some(probs) = &self.probabilities {
            writeln!(f, "  probabilities:")?;
            for (label, values) in probs {
                writeln!(f, "    {}: {:?}", label, values)?;
            }
        }
        if let Some(rhos) = &self.density_matrix {
            writeln!(f, "  density_matrix: {} label(s)", rhos.len())?;
        }
        if let Some(probs) = &self.probabilities_ket {
            writeln!(f, "  probabilities_ket:")?;
            for (label, ket) in probs {
                writeln!(f, "    {}: {:?}", label, ket)?;
            }
        }
        if let Some(inner) = &self.inner_products {
            writeln!(f, "  inner_products: {} label(s)", inner.len())?;
        }
        if let Some(overlaps) = &self.overlaps {
            writeln!(f, "  overlaps:")?;
            for (label, values) in overlaps {
                writeln!(f, "    {}: {:?}", label, values)?;
            }
        }
        Ok(())
    }
}
