//! Error handling logic

use crate::core::SnapshotLabel;
use thiserror::Error;

/// Result type alias for snapshot statistics operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors raised while computing or decoding snapshot statistics.
///
/// Configuration decoding is permissive and never produces an error for a
/// parsed document; the only fatal condition during accumulation is a target
/// state whose length does not match the snapshot it is compared against.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A target state has a different length than a captured snapshot.
    #[error(
        "target state {target_index} has length {target_len} but {label} has length {snapshot_len}"
    )]
    SizeMismatch {
        /// Length of the offending target state.
        target_len: usize,
        /// Length of the snapshot vector it was compared against.
        snapshot_len: usize,
        /// Position of the target state in the configured list.
        target_index: usize,
        /// Snapshot the comparison was made for.
        label: SnapshotLabel,
    },

    /// The configuration text could not be parsed as a document at all.
    #[error("malformed configuration document: {0}")]
    Document(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Returns `(target_len, snapshot_len)` for a size mismatch.
    pub fn mismatched_lengths(&self) -> Option<(usize, usize)> {
        match self {
            SnapshotError::SizeMismatch { target_len, snapshot_len, .. } => {
                Some((*target_len, *snapshot_len))
            }
            SnapshotError::Document(_) => None,
        }
    }
}
