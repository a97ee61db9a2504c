// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod label;
pub mod state;
pub mod matrix;
pub mod constants;

// Re-export public types for convenient access via `qsnap::core::TypeName`
pub use error::{Result, SnapshotError};
pub use label::SnapshotLabel;
pub use state::AmplitudeVector;
pub use matrix::DensityMatrix;
pub use constants::defaults::{DEFAULT_CHOP, DEFAULT_QUDIT_DIM, MAX_QUDIT_DIM};
