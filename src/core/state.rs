// src/core/state.rs

use num_complex::Complex64;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense pure state over some number of qudits.
///
/// The length is the qudit radix raised to the qudit count. Snapshot vectors
/// are borrowed from the backend for the duration of a compute call; target
/// states are owned by the resolved configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmplitudeVector {
    amplitudes: Vec<Complex64>,
}

impl AmplitudeVector {
    /// Wraps the given amplitudes as-is. No normalization is applied.
    pub fn new(amplitudes: Vec<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// Builds a vector from real amplitudes.
    pub fn from_real(values: &[f64]) -> Self {
        values.iter().map(|&re| Complex64::new(re, 0.0)).collect()
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Sum of squared moduli.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Scales the vector so the sum of squared moduli equals 1.
    /// A zero vector is left untouched.
    pub fn renormalize(&mut self) {
        let norm = self.norm_sqr().sqrt();
        if norm.is_zero() || !norm.is_finite() {
            return;
        }
        for c in &mut self.amplitudes {
            *c /= norm;
        }
    }

    /// Computes `Σ self_i · conj(other_i)`.
    ///
    /// Callers check dimensions first; extra trailing entries of the longer
    /// vector are ignored.
    pub fn inner_product(&self, other: &AmplitudeVector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .fold(Complex64::zero(), |acc, (a, b)| acc + a * b.conj())
    }

    /// Elementwise squared modulus, one entry per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl From<Vec<Complex64>> for AmplitudeVector {
    fn from(amplitudes: Vec<Complex64>) -> Self {
        Self::new(amplitudes)
    }
}

impl FromIterator<Complex64> for AmplitudeVector {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
