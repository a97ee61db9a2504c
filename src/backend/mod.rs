// src/backend/mod.rs

//! The backend-side collaborator contract.
//!
//! After each shot the simulator hands over its working state and the
//! snapshots it captured. [`ShotCapture`] is an owned implementation for
//! callers that collect snapshots themselves, and for tests.

use crate::core::{AmplitudeVector, SnapshotLabel};
use std::collections::BTreeMap;

/// Read access to one finished shot.
pub trait Backend {
    /// The state vector at the end of the shot.
    fn working_state(&self) -> &AmplitudeVector;

    /// Snapshots captured during the shot, keyed by label.
    fn snapshots(&self) -> &BTreeMap<SnapshotLabel, AmplitudeVector>;

    /// Classical register readout for the shot, if the circuit measured anything.
    fn classical_outcome(&self) -> Option<&str> {
        None
    }
}

/// Owned record of a single shot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotCapture {
    working_state: AmplitudeVector,
    snapshots: BTreeMap<SnapshotLabel, AmplitudeVector>,
    outcome: Option<String>,
}

impl ShotCapture {
    pub fn new(working_state: AmplitudeVector) -> Self {
        Self { working_state, ..Self::default() }
    }

    /// Records a snapshot, replacing any earlier one with the same label.
    pub fn capture(&mut self, label: impl Into<SnapshotLabel>, state: AmplitudeVector) {
        self.snapshots.insert(label.into(), state);
    }

    /// Builder-style variant of [`ShotCapture::capture`].
    pub fn with_snapshot(mut self, label: impl Into<SnapshotLabel>, state: AmplitudeVector) -> Self {
        self.capture(label, state);
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }
}

impl Backend for ShotCapture {
    fn working_state(&self) -> &AmplitudeVector {
        &self.working_state
    }

    fn snapshots(&self) -> &BTreeMap<SnapshotLabel, AmplitudeVector> {
        &self.snapshots
    }

    fn classical_outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }
}
