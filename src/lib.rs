// src/lib.rs

//! `qsnap` - Snapshot statistics for state-vector quantum simulators
//!
//! A simulator runs a circuit many times ("shots") and may capture labeled
//! snapshots of the full amplitude vector during each shot. This library
//! turns those snapshots into aggregate statistics: sparse ket forms,
//! shot-averaged density matrices and probabilities, and inner products and
//! overlaps against reference states. Partial results from independent
//! workers merge into one aggregate, which is rendered into a JSON document.

pub mod core;
pub mod format;
pub mod validation;
pub mod circuits;
pub mod backend;
pub mod config;
pub mod accumulator;
pub mod compute;
pub mod render;
pub mod engine;

// Re-export the most common types for easier top-level use
pub use crate::core::{AmplitudeVector, DensityMatrix, Result, SnapshotError, SnapshotLabel};
pub use backend::{Backend, ShotCapture};
pub use circuits::{CircuitLayout, RegisterLayout, RegisterLayoutBuilder};
pub use config::{EngineConfig, OutputSelectors};
pub use accumulator::SnapshotAccumulator;
pub use compute::StatisticsComputer;
pub use render::{Renderer, SnapshotReport};
pub use engine::{BaseEngine, Engine, VectorEngine, VectorReport, reduce};

// Example: two workers, one snapshot per shot, merged and rendered.
/// ```
/// use qsnap::{AmplitudeVector, Engine, RegisterLayoutBuilder, ShotCapture, SnapshotLabel, VectorEngine, reduce};
/// use serde_json::json;
/// use std::f64::consts::FRAC_1_SQRT_2;
///
/// let config = json!({
///     "data": ["probabilities", "densitymatrix", "targetstatesprobs"],
///     "target_states": [[1.0, 1.0]],
/// });
/// let layout = RegisterLayoutBuilder::new().add_register("q", 1).build();
/// let plus = AmplitudeVector::from_real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
///
/// let mut workers = Vec::new();
/// for _ in 0..2 {
///     let mut engine = VectorEngine::from_document(&config);
///     let shot = ShotCapture::new(plus.clone()).with_snapshot(SnapshotLabel(0), plus.clone());
///     engine.compute(&layout, &shot)?;
///     workers.push(engine);
/// }
///
/// let total = reduce(workers).expect("at least one worker");
/// let report = total.render();
/// assert_eq!(report.base.shots, 2);
///
/// let probs = &report.snapshots.probabilities.as_ref().unwrap()[&SnapshotLabel(0)];
/// assert!((probs[0] - 0.5).abs() < 1e-12);
/// let overlaps = &report.snapshots.overlaps.as_ref().unwrap()[&SnapshotLabel(0)];
/// assert!((overlaps[0] - 1.0).abs() < 1e-12);
/// # Ok::<(), qsnap::SnapshotError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
