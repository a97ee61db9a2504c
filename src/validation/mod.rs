// src/validation/mod.rs

//! Checks applied to amplitude vectors before they are compared or summed.

use crate::core::{AmplitudeVector, SnapshotError, SnapshotLabel};
use tracing::warn;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that every target state has the same length as `snapshot`.
///
/// Returns the first offending target as a `SizeMismatch`. Run this before
/// any inner product is committed so a failing shot leaves no partial data.
pub fn check_target_sizes(
    label: SnapshotLabel,
    snapshot: &AmplitudeVector,
    targets: &[AmplitudeVector],
) -> Result<(), SnapshotError> {
    for (target_index, target) in targets.iter().enumerate() {
        if target.dim() != snapshot.dim() {
            warn!(
                %label,
                target_index,
                target_len = target.dim(),
                snapshot_len = snapshot.dim(),
                "target state size mismatch"
            );
            return Err(SnapshotError::SizeMismatch {
                target_len: target.dim(),
                snapshot_len: snapshot.dim(),
                target_index,
                label,
            });
        }
    }
    Ok(())
}

/// Returns true if the sum of squared moduli is within `tolerance` of 1.
///
/// # Arguments
/// * `state` - The vector to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
pub fn is_normalized(state: &AmplitudeVector, tolerance: Option<f64>) -> bool {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    (state.norm_sqr() - 1.0).abs() <= tolerance
}
